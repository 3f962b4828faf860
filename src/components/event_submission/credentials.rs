use crate::config::Config;
use crate::error::{credentials_error, google_calendar_error, HelperResult};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// OAuth client identity as written by the one-time authorization flow
#[derive(Debug, Clone, Deserialize)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// File shape of the client-identity file (Google nests the identity
/// under `installed` or `web` depending on the application type)
#[derive(Debug, Deserialize)]
struct IdentityFile {
    installed: Option<ClientIdentity>,
    web: Option<ClientIdentity>,
}

/// Delegated token as written by the one-time authorization flow
#[derive(Debug, Clone, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds; absent means the token's age is unknown
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// A loaded client identity plus its current token
#[derive(Debug, Clone)]
pub struct DelegatedCredential {
    identity: ClientIdentity,
    token: StoredToken,
}

impl DelegatedCredential {
    /// Whether the access token needs refreshing before use.
    ///
    /// A token without a recorded expiry counts as expired when a
    /// refresh token is available, so a stale stored token gets
    /// refreshed before its first use.
    fn expired(&self) -> bool {
        match self.token.expires_at {
            Some(expires_at) => expires_at <= Utc::now().timestamp(),
            None => self.token.refresh_token.is_some(),
        }
    }

    /// Refresh the access token if it has expired.
    ///
    /// The refreshed token lives in memory only; the token file is
    /// written by the authorization flow and never touched here.
    async fn refresh_if_expired(&mut self, client: &Client, token_url: &str) -> HelperResult<()> {
        if !self.expired() {
            return Ok(());
        }

        let Some(refresh_token) = self.token.refresh_token.clone() else {
            // Nothing to refresh with; let the service judge the stored token
            return Ok(());
        };

        let params = [
            ("client_id", self.identity.client_id.clone()),
            ("client_secret", self.identity.client_secret.clone()),
            ("refresh_token", refresh_token.clone()),
            ("grant_type", String::from("refresh_token")),
        ];

        let response = client
            .post(token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| google_calendar_error("Token response missing 'access_token' field"))?;

        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);

        self.token = StoredToken {
            access_token: access_token.to_string(),
            refresh_token: Some(refresh_token),
            expires_at: Some(Utc::now().timestamp() + expires_in),
        };

        info!("Delegated access token refreshed");
        Ok(())
    }
}

/// Lifecycle of the process-wide credential: loaded lazily on the first
/// submission; a load failure is sticky for the process lifetime
enum CredentialState {
    Uninitialized,
    Ready(DelegatedCredential),
    Failed,
}

/// Loads and refreshes the delegated credential backing the pipeline
pub struct CredentialStore {
    config: Arc<RwLock<Config>>,
    state: CredentialState,
}

impl CredentialStore {
    /// Create a store; nothing is read until the first submission
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            state: CredentialState::Uninitialized,
        }
    }

    /// Lazily load the credential files.
    ///
    /// The submission actor calls this from its command loop, so the
    /// load runs at most once at a time by construction. Returns None
    /// once the store has entered its sticky Failed state.
    async fn ensure_loaded(&mut self) -> Option<&mut DelegatedCredential> {
        if matches!(self.state, CredentialState::Uninitialized) {
            let (credentials_path, token_path) = {
                let config = self.config.read().await;
                (config.credentials_path.clone(), config.token_path.clone())
            };

            match Self::load(&credentials_path, &token_path) {
                Ok(credential) => {
                    info!(
                        "Delegated credential loaded from {} and {}",
                        credentials_path, token_path
                    );
                    self.state = CredentialState::Ready(credential);
                }
                Err(e) => {
                    warn!(
                        "Failed to load delegated credential: {}; submissions will fail until restart",
                        e
                    );
                    self.state = CredentialState::Failed;
                }
            }
        }

        match &mut self.state {
            CredentialState::Ready(credential) => Some(credential),
            _ => None,
        }
    }

    fn load(credentials_path: &str, token_path: &str) -> HelperResult<DelegatedCredential> {
        let identity_raw = fs::read_to_string(credentials_path)
            .map_err(|e| credentials_error(&format!("Failed to read {}: {}", credentials_path, e)))?;
        let identity_file: IdentityFile = serde_json::from_str(&identity_raw)
            .map_err(|e| credentials_error(&format!("Failed to parse {}: {}", credentials_path, e)))?;
        let identity = identity_file.installed.or(identity_file.web).ok_or_else(|| {
            credentials_error("Client identity file has neither an 'installed' nor a 'web' section")
        })?;

        let token_raw = fs::read_to_string(token_path)
            .map_err(|e| credentials_error(&format!("Failed to read {}: {}", token_path, e)))?;
        let token: StoredToken = serde_json::from_str(&token_raw)
            .map_err(|e| credentials_error(&format!("Failed to parse {}: {}", token_path, e)))?;

        Ok(DelegatedCredential { identity, token })
    }

    /// A bearer token valid for the next request, refreshing if needed
    pub async fn access_token(&mut self, client: &Client) -> HelperResult<String> {
        let token_url = {
            let config = self.config.read().await;
            config.token_url.clone()
        };

        let Some(credential) = self.ensure_loaded().await else {
            return Err(credentials_error("Calendar client is not available"));
        };

        credential.refresh_if_expired(client, &token_url).await?;
        Ok(credential.token.access_token.clone())
    }
}
