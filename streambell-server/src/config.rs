use std::env;

use streambell_common::error::Error;

/// Process configuration pulled from the environment (after `.env`
/// loading). No core logic depends on where these values came from.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_bot_token: String,
    /// Destination channel for live announcements.
    pub discord_channel_id: String,
    pub twitch_client_id: String,
    pub twitch_client_secret: String,
    /// Optional seed token; refreshed on schedule either way.
    pub twitch_access_token: Option<String>,
    pub channels_file_path: String,
}

impl AppConfig {
    pub fn from_env(default_channels_path: &str) -> Result<Self, Error> {
        Ok(Self {
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            discord_channel_id: require("DISCORD_CHANNEL_ID")?,
            twitch_client_id: require("TWITCH_CLIENT_ID")?,
            twitch_client_secret: require("TWITCH_CLIENT_SECRET")?,
            twitch_access_token: env::var("TWITCH_ACCESS_TOKEN").ok(),
            channels_file_path: env::var("CHANNELS_FILE_PATH")
                .unwrap_or_else(|_| default_channels_path.to_string()),
        })
    }
}

fn require(key: &str) -> Result<String, Error> {
    env::var(key).map_err(|_| Error::Parse(format!("Missing required environment variable {key}")))
}
