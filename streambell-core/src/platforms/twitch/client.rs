// File: streambell-core/src/platforms/twitch/client.rs

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;

use streambell_common::models::twitch::{ChannelInfo, StreamInfo};
use streambell_common::traits::platform_traits::StreamSource;

use super::auth::TwitchAuthState;
use super::requests::stream;
use crate::Error;

/// A small wrapper client for calling the Helix read endpoints.
///
/// Kept as a general reusable entry point: the request helpers in
/// `requests::` take it by reference and pull the current bearer token
/// out of the shared auth state per call.
pub struct TwitchHelixClient {
    http: Arc<ReqwestClient>,
    auth: Arc<TwitchAuthState>,
}

impl TwitchHelixClient {
    pub fn new(auth: Arc<TwitchAuthState>) -> Self {
        Self {
            http: Arc::new(ReqwestClient::new()),
            auth,
        }
    }

    /// Returns an `Arc<ReqwestClient>` reference for advanced usage.
    pub fn http_client(&self) -> Arc<ReqwestClient> {
        self.http.clone()
    }

    pub fn auth(&self) -> Arc<TwitchAuthState> {
        self.auth.clone()
    }

    /// Expose the client_id for Helix requests that require it.
    pub fn client_id(&self) -> &str {
        self.auth.client_id()
    }

    /// Current bearer token for Helix requests.
    pub async fn bearer_token(&self) -> String {
        self.auth.bearer_token().await
    }
}

#[async_trait]
impl StreamSource for TwitchHelixClient {
    async fn users_by_login(&self, logins: &[String]) -> Result<Vec<ChannelInfo>, Error> {
        stream::fetch_users(self, logins).await
    }

    async fn live_streams(&self, user_ids: &[String]) -> Result<Vec<StreamInfo>, Error> {
        stream::fetch_live_streams(self, user_ids).await
    }

    async fn game_name(&self, game_id: &str) -> Result<Option<String>, Error> {
        stream::fetch_game_name(self, game_id).await
    }
}
