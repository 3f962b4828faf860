use super::builder::build_event;
use super::credentials::CredentialStore;
use super::models::EventFormData;
use crate::bus::{NotificationBus, SubmissionOutcome};
use crate::config::{Config, DEFAULT_CALENDAR_ID};
use crate::error::{google_calendar_error, HelperResult};
use chrono_tz::Tz;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{error, info, warn};
use url::Url;

/// The event submission actor that processes messages
pub struct EventSubmissionActor {
    config: Arc<RwLock<Config>>,
    store: CredentialStore,
    client: Client,
    command_rx: mpsc::Receiver<EventSubmissionCommand>,
    bus: NotificationBus,
}

/// Commands that can be sent to the event submission actor
pub enum EventSubmissionCommand {
    /// Create one event from a form payload; the outcome goes out on the bus
    AddEvent(EventFormData),
    Shutdown,
}

/// Handle for communicating with the event submission actor
#[derive(Clone)]
pub struct EventSubmissionActorHandle {
    command_tx: mpsc::Sender<EventSubmissionCommand>,
}

impl EventSubmissionActorHandle {
    /// Queue one event creation; fire-and-forget, the result travels on the bus
    pub async fn add_event(&self, payload: EventFormData) -> HelperResult<()> {
        self.command_tx
            .send(EventSubmissionCommand::AddEvent(payload))
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> HelperResult<()> {
        let _ = self.command_tx.send(EventSubmissionCommand::Shutdown).await;
        Ok(())
    }
}

impl EventSubmissionActor {
    /// Create a new actor and return its handle
    pub fn new(
        config: Arc<RwLock<Config>>,
        bus: NotificationBus,
    ) -> (Self, EventSubmissionActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config: Arc::clone(&config),
            store: CredentialStore::new(config),
            client: Client::new(),
            command_rx,
            bus,
        };

        let handle = EventSubmissionActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Event submission actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                EventSubmissionCommand::AddEvent(payload) => {
                    let outcome = match self.create_event(&payload).await {
                        Ok(created) => {
                            info!("Event created: {}", created);
                            SubmissionOutcome::EventCreated(created)
                        }
                        Err(e) => {
                            error!("Failed to create event: {}", e);
                            SubmissionOutcome::SubmissionFailed(e.to_string())
                        }
                    };
                    self.bus.publish_outcome(outcome);
                }
                EventSubmissionCommand::Shutdown => {
                    info!("Event submission actor shutting down");
                    break;
                }
            }
        }

        info!("Event submission actor shut down");
    }

    /// Create one event: lazy credential, build the body, single insert call
    async fn create_event(&mut self, payload: &EventFormData) -> HelperResult<Value> {
        let access_token = self.store.access_token(&self.client).await?;

        let (api_base_url, timezone) = {
            let config = self.config.read().await;
            (config.api_base_url.clone(), config.timezone.clone())
        };

        // Timed events carry the helper's configured zone, not the zone
        // of whoever filled the form
        let time_zone = match timezone.parse::<Tz>() {
            Ok(tz) => tz.name().to_string(),
            Err(_) => {
                warn!("Invalid timezone {:?} in config, falling back to UTC", timezone);
                chrono_tz::UTC.name().to_string()
            }
        };

        let event = build_event(payload, &time_zone);

        let calendar_id = if payload.calendar_id.is_empty() {
            DEFAULT_CALENDAR_ID
        } else {
            &payload.calendar_id
        };

        let url_str = format!(
            "{}/calendars/{}/events",
            api_base_url.trim_end_matches('/'),
            calendar_id
        );
        let url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&event)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to create event: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to create event: HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse create response: {}", e)))
    }
}
