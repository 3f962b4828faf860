use crate::config::CalendarIdentity;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Identifier of a day-cell element inside the widget's grid
pub type CellId = u64;

/// A day cell currently present in the widget, as seen through the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub id: CellId,
    /// Millisecond Unix timestamp string carried by the cell's date attribute
    pub date_attr: String,
}

/// The modal's form fields, addressed by role rather than element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Calendar,
    Title,
    Location,
    Date,
    StartTime,
    EndTime,
    AllDay,
}

/// Events the surface reports back to the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Child additions/removals anywhere under the widget container
    Mutated,
    /// An injected add control was clicked on this cell
    ControlClicked(DayCell),
    /// The modal's close button was clicked
    CloseClicked,
    /// The modal's save button was clicked
    SubmitClicked,
}

/// Seam to the host dashboard's rendered DOM.
///
/// The embedder implements this over whatever bridge it has to the
/// widget. Operations are cheap and non-blocking; mutations and clicks
/// arrive on the broadcast stream. The `AllDay` checkbox reports its
/// value as `"true"`/`"false"`.
pub trait WidgetSurface: Send + Sync {
    /// Whether an element matching the container selector exists
    fn container_present(&self, selector: &str) -> bool;

    /// Day cells currently exposing a date attribute
    fn day_cells(&self) -> Vec<DayCell>;

    /// Whether the cell already carries an injected add control
    fn has_add_control(&self, cell: CellId) -> bool;

    /// Attach an add control, and the marker that records it, to the cell
    fn attach_add_control(&self, cell: CellId);

    /// Build the modal (hidden) offering the given calendar choices
    fn mount_modal(&self, calendars: &[CalendarIdentity]);

    /// Whether the modal container is present
    fn modal_present(&self) -> bool;

    /// Show or hide the modal container
    fn set_modal_visible(&self, visible: bool);

    /// Set a form field's value
    fn set_field(&self, field: FormField, value: &str);

    /// Current value of a form field; None when the field is missing
    fn field_value(&self, field: FormField) -> Option<String>;

    /// Move input focus to a form field
    fn focus_field(&self, field: FormField);

    /// Drop focus from whatever input currently holds it
    fn blur_active(&self);

    /// Subscribe to mutation and click events
    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent>;
}

/// Shared reference to the embedder's surface implementation
pub type SharedSurface = Arc<dyn WidgetSurface>;

/// Surface used when the helper runs without an embedded widget.
///
/// Reports no container, so the observer logs its warning once and the
/// overlay stays inert; the submission pipeline is unaffected.
#[derive(Debug)]
pub struct DetachedSurface {
    events: broadcast::Sender<SurfaceEvent>,
}

impl DetachedSurface {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(1);
        Self { events }
    }
}

impl Default for DetachedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetSurface for DetachedSurface {
    fn container_present(&self, _selector: &str) -> bool {
        false
    }

    fn day_cells(&self) -> Vec<DayCell> {
        Vec::new()
    }

    fn has_add_control(&self, _cell: CellId) -> bool {
        false
    }

    fn attach_add_control(&self, _cell: CellId) {}

    fn mount_modal(&self, _calendars: &[CalendarIdentity]) {}

    fn modal_present(&self) -> bool {
        false
    }

    fn set_modal_visible(&self, _visible: bool) {}

    fn set_field(&self, _field: FormField, _value: &str) {}

    fn field_value(&self, _field: FormField) -> Option<String> {
        None
    }

    fn focus_field(&self, _field: FormField) {}

    fn blur_active(&self) {}

    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent> {
        self.events.subscribe()
    }
}

/// The surface a standalone helper process runs with
pub fn detached() -> SharedSurface {
    Arc::new(DetachedSurface::new())
}
