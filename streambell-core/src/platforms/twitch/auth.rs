use chrono::{DateTime, Duration, Utc};
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::Error;

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const VALIDATE_URL: &str = "https://id.twitch.tv/oauth2/validate";

#[derive(Deserialize)]
struct TwitchTokenResponse {
    access_token: String,
    expires_in: u64,
}

/// For /validate
#[derive(Deserialize)]
struct TwitchValidateResponse {
    expires_in: u64,
}

/// Process-wide holder of the Twitch app access token.
///
/// The token is refreshed on a schedule and on demand after a rejected
/// call; readers clone the current value, so a refresh is an atomic swap
/// from their point of view.
pub struct TwitchAuthState {
    client_id: String,
    client_secret: String,
    http: ReqwestClient,
    token: RwLock<String>,
    expires_at: RwLock<Option<DateTime<Utc>>>,
}

impl TwitchAuthState {
    pub fn new(client_id: String, client_secret: String, initial_token: Option<String>) -> Self {
        Self {
            client_id,
            client_secret,
            http: ReqwestClient::new(),
            token: RwLock::new(initial_token.unwrap_or_default()),
            expires_at: RwLock::new(None),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Current token value. Cloned out so callers never hold the lock
    /// across a request.
    pub async fn bearer_token(&self) -> String {
        self.token.read().await.clone()
    }

    /// Checks the current token against `/validate`. `Ok(false)` means the
    /// platform rejected it; transport failures are `Credential` errors.
    pub async fn validate(&self) -> Result<bool, Error> {
        let token = self.bearer_token().await;
        if token.is_empty() {
            return Ok(false);
        }

        let resp = self
            .http
            .get(VALIDATE_URL)
            .header("Authorization", format!("OAuth {token}"))
            .send()
            .await
            .map_err(|e| Error::Credential(format!("calling /validate: {e}")))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(false);
        }
        if !resp.status().is_success() {
            return Err(Error::Credential(format!(
                "/validate returned HTTP {}",
                resp.status()
            )));
        }

        let body: TwitchValidateResponse = resp
            .json()
            .await
            .map_err(|e| Error::Credential(format!("parsing /validate response: {e}")))?;
        *self.expires_at.write().await =
            Some(Utc::now() + Duration::seconds(body.expires_in as i64));
        Ok(true)
    }

    /// Obtains a fresh app access token via the client-credentials grant
    /// and swaps it in.
    pub async fn refresh(&self) -> Result<(), Error> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let resp = self
            .http
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::Credential(format!("requesting app token: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Credential(format!(
                "token endpoint: HTTP {status} => {body}"
            )));
        }

        let body: TwitchTokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::Credential(format!("parsing token response: {e}")))?;

        *self.token.write().await = body.access_token;
        *self.expires_at.write().await =
            Some(Utc::now() + Duration::seconds(body.expires_in as i64));
        info!(
            "Refreshed Twitch app access token; expires in {} s",
            body.expires_in
        );
        Ok(())
    }

    /// Validate-then-refresh. Fast path: when the last known expiry is more
    /// than `margin_secs` away, the network round-trip is skipped.
    pub async fn ensure_valid(&self, margin_secs: i64) -> Result<(), Error> {
        if let Some(exp) = *self.expires_at.read().await {
            let remaining = exp - Utc::now();
            if remaining > Duration::seconds(margin_secs) {
                debug!(
                    "Twitch token still valid for {} s; skipping validation",
                    remaining.num_seconds()
                );
                return Ok(());
            }
        }

        match self.validate().await? {
            true => {
                debug!("Twitch token is valid");
                Ok(())
            }
            false => {
                warn!("Twitch token invalid or expired; refreshing");
                self.refresh().await
            }
        }
    }
}
