use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the helper
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(addevent::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(addevent::config))]
    Config(String),

    #[error("Credential error: {0}")]
    #[diagnostic(code(addevent::credentials))]
    Credentials(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(addevent::google_calendar))]
    GoogleCalendar(String),

    #[error("Widget overlay error: {0}")]
    #[diagnostic(code(addevent::overlay))]
    Overlay(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(addevent::component))]
    Component(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(addevent::other))]
    Other(String),
}

/// Type alias for Result with our Error type
pub type HelperResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create credential errors
pub fn credentials_error(message: &str) -> Error {
    Error::Credentials(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create widget overlay errors
pub fn overlay_error(message: &str) -> Error {
    Error::Overlay(message.to_string())
}

/// Helper to create component errors
#[allow(dead_code)]
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
