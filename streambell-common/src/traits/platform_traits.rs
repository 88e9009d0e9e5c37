use async_trait::async_trait;

use crate::error::Error;
use crate::models::twitch::{ChannelInfo, StreamInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Error(String),
}

#[async_trait]
pub trait PlatformAuth {
    async fn authenticate(&mut self) -> Result<(), Error>;
    async fn is_authenticated(&self) -> Result<bool, Error>;
}

/// Connection lifecycle plus plain-text message delivery for a chat
/// platform.
#[async_trait]
pub trait PlatformIntegration {
    async fn connect(&mut self) -> Result<(), Error>;
    async fn disconnect(&mut self) -> Result<(), Error>;
    async fn send_message(&self, channel: &str, message: &str) -> Result<(), Error>;
    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error>;
}

/// Read side of the streaming platform consumed by the live-status watch.
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Resolve channel names to identities. Names unknown upstream are
    /// silently absent from the result.
    async fn users_by_login(&self, logins: &[String]) -> Result<Vec<ChannelInfo>, Error>;

    /// Fetch the streams among `user_ids` that are currently live.
    async fn live_streams(&self, user_ids: &[String]) -> Result<Vec<StreamInfo>, Error>;

    /// Resolve a game/category id to its display name.
    async fn game_name(&self, game_id: &str) -> Result<Option<String>, Error>;
}

/// Destination for live announcements.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), Error>;
}
