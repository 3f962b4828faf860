use addevent_helper::bus::{
    AddEventRequest, NotificationBus, SubmissionOutcome, WidgetNotification,
};
use addevent_helper::components::event_submission::models::EventFormData;
use addevent_helper::config::{CalendarIdentity, Config};
use std::sync::Arc;
use tokio::sync::RwLock;

fn test_config() -> Config {
    Config {
        credentials_path: "credentials.json".to_string(),
        token_path: "token.json".to_string(),
        container_selector: ".calendar-widget".to_string(),
        observer_startup_delay_secs: 0,
        mutation_settle_ms: 0,
        initial_injection_delay_secs: 0,
        timezone: "UTC".to_string(),
        api_base_url: "https://www.googleapis.com/calendar/v3".to_string(),
        token_url: "https://oauth2.googleapis.com/token".to_string(),
        calendars: vec![CalendarIdentity {
            name: "Primary".to_string(),
            calendar_id: "primary".to_string(),
        }],
    }
}

/// Smoke test to verify that a config can be constructed and shared
#[tokio::test]
async fn test_config_shared_access() {
    let config = Arc::new(RwLock::new(test_config()));

    let selector = {
        let config_guard = config.read().await;
        config_guard.container_selector.clone()
    };

    assert_eq!(selector, ".calendar-widget");
    assert_eq!(config.read().await.calendars.len(), 1);
}

/// The named delays keep the source module's relative ordering:
/// observer startup before settling, initial injection last
#[test]
fn test_config_delay_accessors() {
    let mut config = test_config();
    config.observer_startup_delay_secs = 2;
    config.mutation_settle_ms = 2000;
    config.initial_injection_delay_secs = 10;

    assert_eq!(config.observer_startup_delay().as_secs(), 2);
    assert_eq!(config.mutation_settle_delay().as_millis(), 2000);
    assert_eq!(config.initial_injection_delay().as_secs(), 10);
}

/// Bus round-trip: each channel delivers to a subscriber that existed
/// before the publish
#[tokio::test]
async fn test_bus_round_trip() {
    let bus = NotificationBus::new();

    let mut widget_rx = bus.subscribe_widget();
    let mut request_rx = bus.subscribe_requests();
    let mut outcome_rx = bus.subscribe_outcomes();

    bus.publish_widget(WidgetNotification::CalendarRendered);
    assert_eq!(
        widget_rx.recv().await.unwrap(),
        WidgetNotification::CalendarRendered
    );

    let payload = EventFormData {
        title: "Lunch".to_string(),
        date: "2025-03-10".to_string(),
        all_day: true,
        ..Default::default()
    };
    bus.publish_request(AddEventRequest(payload.clone()));
    assert_eq!(request_rx.recv().await.unwrap(), AddEventRequest(payload));

    bus.publish_outcome(SubmissionOutcome::SubmissionFailed("boom".to_string()));
    assert_eq!(
        outcome_rx.recv().await.unwrap(),
        SubmissionOutcome::SubmissionFailed("boom".to_string())
    );
}

/// Publishing with no subscribers must not error or panic
#[tokio::test]
async fn test_bus_publish_without_subscribers() {
    let bus = NotificationBus::new();
    bus.publish_widget(WidgetNotification::DomReady);
    bus.publish_request(AddEventRequest(EventFormData::default()));
    bus.publish_outcome(SubmissionOutcome::SubmissionFailed("nobody home".to_string()));
}

/// Test for component initialization order using the real ComponentManager
/// and mock components
#[tokio::test]
async fn test_component_initialization_order() {
    use addevent_helper::components::calendar_overlay::surface::{self, SharedSurface};
    use addevent_helper::components::{Component, ComponentManager};
    use addevent_helper::error::HelperResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // A global initialization counter to track the order
    static INIT_COUNTER: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    // Records component init order
    let order_recorder = Arc::new(Mutex::new(Vec::<(String, usize)>::new()));

    struct MockSubmissionComponent {
        order_recorder: Arc<Mutex<Vec<(String, usize)>>>,
    }

    struct MockOverlayComponent {
        order_recorder: Arc<Mutex<Vec<(String, usize)>>>,
    }

    #[async_trait]
    impl Component for MockSubmissionComponent {
        fn name(&self) -> &'static str {
            "event_submission"
        }

        async fn init(
            &self,
            _bus: &NotificationBus,
            _config: Arc<RwLock<Config>>,
            _surface: SharedSurface,
        ) -> HelperResult<()> {
            let order = INIT_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.order_recorder
                .lock()
                .unwrap()
                .push((self.name().to_string(), order));
            Ok(())
        }

        async fn shutdown(&self) -> HelperResult<()> {
            Ok(())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[async_trait]
    impl Component for MockOverlayComponent {
        fn name(&self) -> &'static str {
            "calendar_overlay"
        }

        async fn init(
            &self,
            _bus: &NotificationBus,
            _config: Arc<RwLock<Config>>,
            _surface: SharedSurface,
        ) -> HelperResult<()> {
            let order = INIT_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.order_recorder
                .lock()
                .unwrap()
                .push((self.name().to_string(), order));
            Ok(())
        }

        async fn shutdown(&self) -> HelperResult<()> {
            Ok(())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    let config = Arc::new(RwLock::new(test_config()));
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    // Register the components in the expected order
    component_manager.register(MockSubmissionComponent {
        order_recorder: Arc::clone(&order_recorder),
    });
    component_manager.register(MockOverlayComponent {
        order_recorder: Arc::clone(&order_recorder),
    });

    let bus = NotificationBus::new();
    component_manager
        .init_all(&bus, Arc::clone(&config), surface::detached())
        .await
        .unwrap();

    let records = order_recorder.lock().unwrap();
    assert_eq!(records.len(), 2, "Expected 2 components to be initialized");

    let mut sorted_records = records.clone();
    sorted_records.sort_by_key(|(_, order)| *order);

    // The submission pipeline must come up first so its bus subscription
    // exists before the overlay can dispatch a request
    assert_eq!(
        sorted_records[0].0, "event_submission",
        "Event submission must be initialized before the overlay"
    );
    assert_eq!(
        sorted_records[1].0, "calendar_overlay",
        "Calendar overlay must be initialized after the submission pipeline"
    );
}
