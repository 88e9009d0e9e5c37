//! streambell-server/src/context.rs
//!
//! Defines the shared state bag (ServerContext) handed to the poller and
//! the command handler.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use streambell_common::models::twitch::LiveStatusTable;
use streambell_core::platforms::twitch::{TwitchAuthState, TwitchHelixClient};
use streambell_core::repositories::channel_registry::ChannelRegistry;

use crate::config::AppConfig;

pub struct ServerContext {
    pub registry: Arc<Mutex<ChannelRegistry>>,
    pub live_status: Arc<Mutex<LiveStatusTable>>,
    pub auth: Arc<TwitchAuthState>,
    pub helix: Arc<TwitchHelixClient>,
}

impl ServerContext {
    /// Loads the persisted channel list (a corrupt file degrades to an
    /// empty list) and seeds every channel's live flag to offline.
    pub fn new(config: &AppConfig) -> Self {
        let registry = ChannelRegistry::load_or_default(&config.channels_file_path);
        info!(
            "Loaded {} watched channel(s) from {}",
            registry.len(),
            config.channels_file_path
        );

        let mut live_status = LiveStatusTable::new();
        for name in registry.list() {
            live_status.track(name);
        }

        let auth = Arc::new(TwitchAuthState::new(
            config.twitch_client_id.clone(),
            config.twitch_client_secret.clone(),
            config.twitch_access_token.clone(),
        ));
        let helix = Arc::new(TwitchHelixClient::new(auth.clone()));

        Self {
            registry: Arc::new(Mutex::new(registry)),
            live_status: Arc::new(Mutex::new(live_status)),
            auth,
            helix,
        }
    }
}
