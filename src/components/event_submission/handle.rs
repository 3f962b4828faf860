use super::actor::{EventSubmissionActor, EventSubmissionActorHandle};
use super::models::EventFormData;
use crate::bus::NotificationBus;
use crate::config::Config;
use crate::error::HelperResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the event submission actor
#[derive(Clone)]
pub struct EventSubmissionHandle {
    actor_handle: EventSubmissionActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl EventSubmissionHandle {
    /// Create a new EventSubmissionHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>, bus: NotificationBus) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = EventSubmissionActor::new(config, bus);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Queue one event creation from a form payload
    pub async fn add_event(&self, payload: EventFormData) -> HelperResult<()> {
        self.actor_handle.add_event(payload).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> HelperResult<()> {
        self.actor_handle.shutdown().await
    }
}
