use super::surface::{FormField, SharedSurface, SurfaceEvent};
use crate::bus::{AddEventRequest, NotificationBus, SubmissionOutcome, WidgetNotification};
use crate::components::event_submission::models::EventFormData;
use crate::config::Config;
use crate::error::{overlay_error, HelperResult};
use chrono::DateTime;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, error, info, warn};

/// Visibility of the add-event modal, owned by the overlay actor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalVisibility {
    #[default]
    Hidden,
    Shown,
}

/// Commands that can be sent to the overlay actor
pub enum OverlayCommand {
    /// Run one scan-and-attach pass over the current day cells
    InjectControls,
    Shutdown,
}

/// Handle for communicating with the overlay actor
#[derive(Clone)]
pub struct CalendarOverlayActorHandle {
    command_tx: mpsc::Sender<OverlayCommand>,
}

impl CalendarOverlayActorHandle {
    /// Trigger one injection pass
    pub async fn inject_controls(&self) -> HelperResult<()> {
        self.command_tx
            .send(OverlayCommand::InjectControls)
            .await
            .map_err(|e| overlay_error(&format!("Actor mailbox error: {}", e)))
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> HelperResult<()> {
        let _ = self.command_tx.send(OverlayCommand::Shutdown).await;
        Ok(())
    }
}

/// The overlay actor: owns modal state and processes surface events.
///
/// Every state mutation happens on the actor's loop, which stands in
/// for the single UI thread the widget renders on; the injection
/// marker, not a lock, keeps repeated passes from double-attaching.
pub struct CalendarOverlayActor {
    config: Arc<RwLock<Config>>,
    surface: SharedSurface,
    bus: NotificationBus,
    command_rx: mpsc::Receiver<OverlayCommand>,
    visibility: ModalVisibility,
    handlers_wired: bool,
}

impl CalendarOverlayActor {
    /// Create a new actor and return its handle
    pub fn new(
        config: Arc<RwLock<Config>>,
        surface: SharedSurface,
        bus: NotificationBus,
    ) -> (Self, CalendarOverlayActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            surface,
            bus,
            command_rx,
            visibility: ModalVisibility::Hidden,
            handlers_wired: false,
        };

        let handle = CalendarOverlayActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar overlay actor started");

        let mut surface_events = self.surface.subscribe();
        let mut widget_rx = self.bus.subscribe_widget();
        let mut outcome_rx = self.bus.subscribe_outcomes();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(OverlayCommand::InjectControls) => self.inject_controls(),
                    Some(OverlayCommand::Shutdown) | None => {
                        info!("Calendar overlay actor shutting down");
                        break;
                    }
                },
                event = surface_events.recv() => match event {
                    Ok(event) => self.handle_surface_event(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Overlay actor lagged behind {} surface events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                notification = widget_rx.recv() => match notification {
                    Ok(WidgetNotification::CalendarRendered) => self.inject_controls(),
                    Ok(WidgetNotification::DomReady) => self.wire_modal().await,
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                outcome = outcome_rx.recv() => match outcome {
                    Ok(SubmissionOutcome::EventCreated(value)) => {
                        info!("Event created successfully: {}", value);
                    }
                    Ok(SubmissionOutcome::SubmissionFailed(detail)) => {
                        error!("Event submission failed: {}", detail);
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }

        info!("Calendar overlay actor shut down");
    }

    fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            // The observer owns mutation handling
            SurfaceEvent::Mutated => {}
            SurfaceEvent::ControlClicked(cell) => match cell_date_string(&cell.date_attr) {
                Some(date) => self.show_modal(&date),
                None => warn!(
                    "Ignoring add-control click with unparseable date attribute {:?}",
                    cell.date_attr
                ),
            },
            SurfaceEvent::CloseClicked if self.handlers_wired => self.hide_modal(),
            SurfaceEvent::SubmitClicked if self.handlers_wired => self.submit(),
            SurfaceEvent::CloseClicked | SurfaceEvent::SubmitClicked => {
                debug!("Modal button clicked before handlers were wired; ignoring");
            }
        }
    }

    /// One idempotent scan-and-attach pass over the current day cells
    fn inject_controls(&mut self) {
        let cells = self.surface.day_cells();
        debug!("Injection pass over {} day cells", cells.len());

        for cell in cells {
            if self.surface.has_add_control(cell.id) {
                continue; // already added
            }
            self.surface.attach_add_control(cell.id);
        }
    }

    /// Reveal the modal anchored to the given date
    fn show_modal(&mut self, date: &str) {
        debug!("Modal {:?} -> Shown for {}", self.visibility, date);
        self.visibility = ModalVisibility::Shown;
        self.surface.set_modal_visible(true);
        self.surface.set_field(FormField::Date, date);
        // Single deterministic focus target: the first field a user fills
        self.surface.focus_field(FormField::Title);
    }

    /// Hide the modal and drop input focus
    fn hide_modal(&mut self) {
        debug!("Modal {:?} -> Hidden", self.visibility);
        self.visibility = ModalVisibility::Hidden;
        self.surface.set_modal_visible(false);
        self.surface.blur_active();
    }

    /// Read the six form fields; empty record when the modal is gone
    fn read_form_data(&self) -> EventFormData {
        if !self.surface.modal_present() {
            return EventFormData::default();
        }

        let value = |field| self.surface.field_value(field).unwrap_or_default();

        EventFormData {
            calendar_id: value(FormField::Calendar),
            title: value(FormField::Title),
            location: value(FormField::Location),
            date: value(FormField::Date),
            start_time: value(FormField::StartTime),
            end_time: value(FormField::EndTime),
            all_day: self
                .surface
                .field_value(FormField::AllDay)
                .map(|v| v == "true")
                .unwrap_or(false),
        }
    }

    /// Optimistic submit: dispatch, then close without waiting for the outcome
    fn submit(&mut self) {
        let data = self.read_form_data();
        info!("Submitting new event: {:?}", data);
        self.bus.publish_request(AddEventRequest(data));
        self.hide_modal();
    }

    /// Mount the modal (hidden) and start honoring its buttons
    async fn wire_modal(&mut self) {
        if self.handlers_wired {
            return;
        }

        let calendars = {
            let config = self.config.read().await;
            config.calendars.clone()
        };

        self.surface.mount_modal(&calendars);
        self.handlers_wired = true;
        debug!("Modal mounted and handlers wired");
    }
}

/// Convert a millisecond Unix timestamp string to a UTC `YYYY-MM-DD` date
fn cell_date_string(date_attr: &str) -> Option<String> {
    let millis = date_attr.trim().parse::<i64>().ok()?;
    let date_time = DateTime::from_timestamp_millis(millis)?;
    Some(date_time.date_naive().format("%Y-%m-%d").to_string())
}
