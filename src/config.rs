use crate::error::{env_error, HelperResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;

/// Calendar used when a form payload carries no calendar id
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// One operator-configured calendar offered in the modal's select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarIdentity {
    /// Display name shown to the user
    pub name: String,
    /// Opaque calendar id understood by the calendar service
    pub calendar_id: String,
}

/// File shape of `config/calendars.toml`
#[derive(Debug, Deserialize)]
struct CalendarsFile {
    calendars: Vec<CalendarIdentity>,
}

/// Main configuration structure for the helper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the OAuth client identity file
    pub credentials_path: String,
    /// Path to the stored delegated token file
    pub token_path: String,
    /// Class-name selector of the third-party widget container
    pub container_selector: String,
    /// Seconds the observer waits before looking for the container
    pub observer_startup_delay_secs: u64,
    /// Milliseconds the observer lets the widget settle after a mutation batch
    pub mutation_settle_ms: u64,
    /// Seconds after init before the one-shot initial injection pass
    pub initial_injection_delay_secs: u64,
    /// IANA timezone attached to timed events
    pub timezone: String,
    /// Base URL of the calendar API
    pub api_base_url: String,
    /// OAuth token endpoint used for refreshes
    pub token_url: String,
    /// Calendars offered in the modal's select
    pub calendars: Vec<CalendarIdentity>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> HelperResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let credentials_path = env::var("GOOGLE_CREDENTIALS_PATH")
            .unwrap_or_else(|_| String::from("credentials.json"));
        let token_path =
            env::var("GOOGLE_TOKEN_PATH").unwrap_or_else(|_| String::from("token.json"));

        let container_selector = env::var("WIDGET_CONTAINER_SELECTOR")
            .unwrap_or_else(|_| String::from(".calendar-widget"));

        // Named durations; the widget's render timing is not controllable,
        // so all three stay operator-tunable
        let observer_startup_delay_secs = match env::var("OBSERVER_STARTUP_DELAY_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid OBSERVER_STARTUP_DELAY_SECS format"))?,
            Err(_) => 2,
        };
        let mutation_settle_ms = match env::var("MUTATION_SETTLE_MS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid MUTATION_SETTLE_MS format"))?,
            Err(_) => 2000,
        };
        let initial_injection_delay_secs = match env::var("INITIAL_INJECTION_DELAY_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid INITIAL_INJECTION_DELAY_SECS format"))?,
            Err(_) => 10,
        };

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));

        let api_base_url = env::var("CALENDAR_API_BASE_URL")
            .unwrap_or_else(|_| String::from("https://www.googleapis.com/calendar/v3"));
        let token_url = env::var("OAUTH_TOKEN_URL")
            .unwrap_or_else(|_| String::from("https://oauth2.googleapis.com/token"));

        // Default calendar list, overridden by config file if it exists
        let mut calendars = vec![CalendarIdentity {
            name: String::from("Primary"),
            calendar_id: String::from(DEFAULT_CALENDAR_ID),
        }];

        if let Ok(content) = fs::read_to_string("config/calendars.toml") {
            if let Ok(file) = toml::from_str::<CalendarsFile>(&content) {
                if !file.calendars.is_empty() {
                    calendars = file.calendars;
                }
            }
        }

        Ok(Config {
            credentials_path,
            token_path,
            container_selector,
            observer_startup_delay_secs,
            mutation_settle_ms,
            initial_injection_delay_secs,
            timezone,
            api_base_url,
            token_url,
            calendars,
        })
    }

    /// Delay before the observer first looks for the widget container
    pub fn observer_startup_delay(&self) -> Duration {
        Duration::from_secs(self.observer_startup_delay_secs)
    }

    /// Settling delay between a mutation batch and the injection pass
    pub fn mutation_settle_delay(&self) -> Duration {
        Duration::from_millis(self.mutation_settle_ms)
    }

    /// Delay before the one-shot injection pass that follows startup
    pub fn initial_injection_delay(&self) -> Duration {
        Duration::from_secs(self.initial_injection_delay_secs)
    }
}
