mod actor;
mod handle;
mod observer;
pub mod surface;

pub use actor::ModalVisibility;
pub use handle::CalendarOverlayHandle;

use crate::bus::NotificationBus;
use crate::config::Config;
use crate::error::HelperResult;
use async_trait::async_trait;
use std::sync::Arc;
use surface::SharedSurface;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::error;

/// Calendar overlay component: widget observer plus the injection and
/// modal controller
#[derive(Default)]
pub struct CalendarOverlay {
    handle: RwLock<Option<CalendarOverlayHandle>>,
}

impl CalendarOverlay {
    /// Create a new calendar overlay component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<CalendarOverlayHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for CalendarOverlay {
    fn name(&self) -> &'static str {
        "calendar_overlay"
    }

    async fn init(
        &self,
        bus: &NotificationBus,
        config: Arc<RwLock<Config>>,
        surface: SharedSurface,
    ) -> HelperResult<()> {
        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            *handle_lock = Some(CalendarOverlayHandle::new(
                Arc::clone(&config),
                Arc::clone(&surface),
                bus.clone(),
            ));
        }

        let handle = handle_lock.as_ref().unwrap().clone();

        // Observer: re-injects controls whenever the widget re-renders
        observer::start_observer(Arc::clone(&surface), Arc::clone(&config), handle.actor_handle());

        // One-shot initial pass once the widget has had time to render
        let initial_delay = {
            let config = config.read().await;
            config.initial_injection_delay()
        };
        tokio::spawn(async move {
            sleep(initial_delay).await;
            if let Err(e) = handle.inject_controls().await {
                error!("Initial injection pass failed: {}", e);
            }
        });

        Ok(())
    }

    async fn shutdown(&self) -> HelperResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
