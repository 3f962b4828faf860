use addevent_helper::components::event_submission::builder::{build_event, UNTITLED_EVENT};
use addevent_helper::components::event_submission::models::EventFormData;

fn march_tenth() -> EventFormData {
    EventFormData {
        title: "Dentist".to_string(),
        location: "Main Street 3".to_string(),
        date: "2025-03-10".to_string(),
        ..Default::default()
    }
}

/// An all-day event spans the submitted date on both endpoints, with no
/// next-day increment and no dateTime fields
#[test]
fn all_day_event_spans_single_day() {
    let payload = EventFormData {
        all_day: true,
        ..march_tenth()
    };

    let event = build_event(&payload, "Europe/Helsinki");

    assert_eq!(event.start.date.as_deref(), Some("2025-03-10"));
    assert_eq!(event.end.date.as_deref(), Some("2025-03-10"));
    assert!(event.start.date_time.is_none());
    assert!(event.end.date_time.is_none());
    assert!(event.start.time_zone.is_none());
    assert!(event.end.time_zone.is_none());
}

/// An all-day event ignores whatever times are still in the form
#[test]
fn all_day_event_ignores_times() {
    let payload = EventFormData {
        all_day: true,
        start_time: "09:00".to_string(),
        end_time: "10:30".to_string(),
        ..march_tenth()
    };

    let event = build_event(&payload, "Europe/Helsinki");

    assert!(event.start.date_time.is_none());
    assert!(event.end.date_time.is_none());
}

/// A timed event concatenates date and time with seconds fixed to zero
/// and carries the helper's timezone on both endpoints
#[test]
fn timed_event_concatenates_date_and_time() {
    let payload = EventFormData {
        start_time: "09:00".to_string(),
        end_time: "10:30".to_string(),
        ..march_tenth()
    };

    let event = build_event(&payload, "Europe/Helsinki");

    assert_eq!(event.start.date_time.as_deref(), Some("2025-03-10T09:00:00"));
    assert_eq!(event.end.date_time.as_deref(), Some("2025-03-10T10:30:00"));
    assert_eq!(event.start.time_zone.as_deref(), Some("Europe/Helsinki"));
    assert_eq!(event.start.time_zone, event.end.time_zone);
    assert!(event.start.date.is_none());
    assert!(event.end.date.is_none());
}

/// Missing times on a timed event default to the start and end of the day
#[test]
fn missing_times_default_to_day_bounds() {
    let event = build_event(&march_tenth(), "UTC");

    assert_eq!(event.start.date_time.as_deref(), Some("2025-03-10T00:00:00"));
    assert_eq!(event.end.date_time.as_deref(), Some("2025-03-10T23:59:00"));
}

/// An empty title degrades to the untitled placeholder; the location
/// passes through as given
#[test]
fn empty_fields_degrade_to_defaults() {
    let payload = EventFormData {
        date: "2025-03-10".to_string(),
        all_day: true,
        ..Default::default()
    };

    let event = build_event(&payload, "UTC");

    assert_eq!(event.summary, UNTITLED_EVENT);
    assert_eq!(event.location, "");

    let titled = build_event(&march_tenth(), "UTC");
    assert_eq!(titled.summary, "Dentist");
    assert_eq!(titled.location, "Main Street 3");
}

/// End-before-start payloads pass through unchanged: the service is the
/// sole validator
#[test]
fn end_before_start_is_not_rejected() {
    let payload = EventFormData {
        start_time: "18:00".to_string(),
        end_time: "09:00".to_string(),
        ..march_tenth()
    };

    let event = build_event(&payload, "UTC");

    assert_eq!(event.start.date_time.as_deref(), Some("2025-03-10T18:00:00"));
    assert_eq!(event.end.date_time.as_deref(), Some("2025-03-10T09:00:00"));
}

/// The serialized body uses the service's camelCase spelling and omits
/// the unset endpoint representation entirely
#[test]
fn serialized_shape_matches_the_service() {
    let all_day = build_event(
        &EventFormData {
            all_day: true,
            ..march_tenth()
        },
        "Europe/Helsinki",
    );
    let all_day_json = serde_json::to_value(&all_day).unwrap();

    assert_eq!(all_day_json["start"]["date"], "2025-03-10");
    assert!(all_day_json["start"].get("dateTime").is_none());
    assert!(all_day_json["start"].get("timeZone").is_none());

    let timed = build_event(
        &EventFormData {
            start_time: "09:00".to_string(),
            ..march_tenth()
        },
        "Europe/Helsinki",
    );
    let timed_json = serde_json::to_value(&timed).unwrap();

    assert_eq!(timed_json["start"]["dateTime"], "2025-03-10T09:00:00");
    assert_eq!(timed_json["start"]["timeZone"], "Europe/Helsinki");
    assert!(timed_json["start"].get("date").is_none());
    assert_eq!(timed_json["summary"], "Dentist");
}
