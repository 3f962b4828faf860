mod actor;
pub mod builder;
pub mod credentials;
mod handle;
pub mod models;

pub use handle::EventSubmissionHandle;

use crate::bus::{AddEventRequest, NotificationBus};
use crate::config::Config;
use crate::error::HelperResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, warn};

use super::calendar_overlay::surface::SharedSurface;

/// Event submission component: turns form payloads into calendar events
#[derive(Default)]
pub struct EventSubmission {
    handle: RwLock<Option<EventSubmissionHandle>>,
}

impl EventSubmission {
    /// Create a new event submission component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<EventSubmissionHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for EventSubmission {
    fn name(&self) -> &'static str {
        "event_submission"
    }

    async fn init(
        &self,
        bus: &NotificationBus,
        config: Arc<RwLock<Config>>,
        _surface: SharedSurface,
    ) -> HelperResult<()> {
        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            *handle_lock = Some(EventSubmissionHandle::new(
                Arc::clone(&config),
                bus.clone(),
            ));
        }

        let handle = handle_lock.as_ref().unwrap().clone();

        // Forward add-event requests from the bus into the actor mailbox
        let mut requests = bus.subscribe_requests();
        tokio::spawn(async move {
            loop {
                match requests.recv().await {
                    Ok(AddEventRequest(payload)) => {
                        if let Err(e) = handle.add_event(payload).await {
                            error!("Failed to queue event submission: {}", e);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Submission pipeline lagged behind {} requests", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
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
