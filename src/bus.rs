use crate::components::event_submission::models::EventFormData;
use serde_json::Value;
use tokio::sync::broadcast;

/// Capacity of each bus channel; slow subscribers lag past this
const BUS_CAPACITY: usize = 32;

/// Lifecycle notifications the host dashboard sends the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetNotification {
    /// The calendar widget finished a render pass
    CalendarRendered,
    /// The host finished building the dashboard DOM
    DomReady,
}

/// Request sent from the overlay to the submission pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct AddEventRequest(pub EventFormData);

/// Result of a submission, sent from the pipeline back to the overlay
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The service accepted the event; carries its returned representation
    EventCreated(Value),
    /// The create call failed; carries the stringified error
    SubmissionFailed(String),
}

/// In-process rendition of the host dashboard's notification bus.
///
/// Two narrow channels connect the halves of the module (overlay to
/// helper requests, helper to overlay outcomes); a third carries the
/// widget-lifecycle notifications published by the host.
#[derive(Clone)]
pub struct NotificationBus {
    widget_tx: broadcast::Sender<WidgetNotification>,
    request_tx: broadcast::Sender<AddEventRequest>,
    outcome_tx: broadcast::Sender<SubmissionOutcome>,
}

impl NotificationBus {
    /// Create a new bus with all channels open
    pub fn new() -> Self {
        let (widget_tx, _) = broadcast::channel(BUS_CAPACITY);
        let (request_tx, _) = broadcast::channel(BUS_CAPACITY);
        let (outcome_tx, _) = broadcast::channel(BUS_CAPACITY);

        Self {
            widget_tx,
            request_tx,
            outcome_tx,
        }
    }

    /// Publish a widget-lifecycle notification
    pub fn publish_widget(&self, notification: WidgetNotification) {
        // A send error only means nobody is subscribed yet
        let _ = self.widget_tx.send(notification);
    }

    /// Subscribe to widget-lifecycle notifications
    pub fn subscribe_widget(&self) -> broadcast::Receiver<WidgetNotification> {
        self.widget_tx.subscribe()
    }

    /// Publish an add-event request toward the submission pipeline
    pub fn publish_request(&self, request: AddEventRequest) {
        let _ = self.request_tx.send(request);
    }

    /// Subscribe to add-event requests
    pub fn subscribe_requests(&self) -> broadcast::Receiver<AddEventRequest> {
        self.request_tx.subscribe()
    }

    /// Publish a submission outcome toward the overlay
    pub fn publish_outcome(&self, outcome: SubmissionOutcome) {
        let _ = self.outcome_tx.send(outcome);
    }

    /// Subscribe to submission outcomes
    pub fn subscribe_outcomes(&self) -> broadcast::Receiver<SubmissionOutcome> {
        self.outcome_tx.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
