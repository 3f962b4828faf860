use super::models::{CalendarEvent, EventDateTime, EventFormData};

/// Summary given to events submitted without a title
pub const UNTITLED_EVENT: &str = "Untitled Event";

const DEFAULT_START_TIME: &str = "00:00";
const DEFAULT_END_TIME: &str = "23:59";

/// Build the service-shaped event body from a form payload.
///
/// Pure and infallible: missing fields degrade to defaults and the
/// service stays the sole validator (including end > start). An all-day
/// event spans only the submitted date, without the next-day roll-over
/// the service convention would use for a full day. Timed events carry
/// the helper's timezone on both endpoints, not the timezone of
/// whoever filled the form.
pub fn build_event(payload: &EventFormData, time_zone: &str) -> CalendarEvent {
    let summary = if payload.title.is_empty() {
        String::from(UNTITLED_EVENT)
    } else {
        payload.title.clone()
    };

    let (start, end) = if payload.all_day {
        let endpoint = EventDateTime {
            date: Some(payload.date.clone()),
            ..Default::default()
        };
        (endpoint.clone(), endpoint)
    } else {
        let start_time = if payload.start_time.is_empty() {
            DEFAULT_START_TIME
        } else {
            &payload.start_time
        };
        let end_time = if payload.end_time.is_empty() {
            DEFAULT_END_TIME
        } else {
            &payload.end_time
        };

        // Seconds are fixed to zero
        let timed = |time: &str| EventDateTime {
            date_time: Some(format!("{}T{}:00", payload.date, time)),
            time_zone: Some(time_zone.to_string()),
            ..Default::default()
        };
        (timed(start_time), timed(end_time))
    };

    CalendarEvent {
        summary,
        location: payload.location.clone(),
        start,
        end,
    }
}
