use serde::{Deserialize, Serialize};

/// Form payload captured from the add-event modal.
///
/// Times are `HH:mm` and the date is `YYYY-MM-DD`; empty strings mean
/// the user left the field unset. Field names follow the form's wire
/// spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFormData {
    /// Target calendar; empty means the service default
    pub calendar_id: String,
    pub title: String,
    pub location: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub all_day: bool,
}

/// One endpoint of a calendar event.
///
/// Exactly one of `date` (all-day) or `date_time` (timed) is set, the
/// same one on both endpoints of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Event body in the shape the calendar service's insert call expects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub location: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}
