use super::actor::{CalendarOverlayActor, CalendarOverlayActorHandle};
use super::surface::SharedSurface;
use crate::bus::NotificationBus;
use crate::config::Config;
use crate::error::HelperResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the calendar overlay actor
#[derive(Clone)]
pub struct CalendarOverlayHandle {
    actor_handle: CalendarOverlayActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarOverlayHandle {
    /// Create a new CalendarOverlayHandle and spawn the actor
    pub fn new(
        config: Arc<RwLock<Config>>,
        surface: SharedSurface,
        bus: NotificationBus,
    ) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = CalendarOverlayActor::new(config, surface, bus);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Trigger one scan-and-attach injection pass
    pub async fn inject_controls(&self) -> HelperResult<()> {
        self.actor_handle.inject_controls().await
    }

    /// Handle used by the observer to trigger injection passes
    pub(crate) fn actor_handle(&self) -> CalendarOverlayActorHandle {
        self.actor_handle.clone()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> HelperResult<()> {
        self.actor_handle.shutdown().await
    }
}
