mod event_builder_tests;
mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: config, bus and component lifecycle basics
// - event_builder_tests: form payload -> service event body properties
// - overlay_mock: an in-memory widget surface driving the overlay actor
// - submission_mock: the submission pipeline against a mocked calendar API
