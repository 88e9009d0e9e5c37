// File: streambell-core/src/services/discord/slashcommands/channels.rs
//
// The three channel-list commands. Each handler produces exactly one
// textual reply; "already exists" and "not found" are normal outcomes,
// not errors.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::error;
use twilight_model::application::command::CommandType;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use streambell_common::models::twitch::LiveStatusTable;

use crate::repositories::channel_registry::{AddOutcome, ChannelRegistry, RemoveOutcome};

pub fn create_addchannel_command() -> CommandBuilder {
    CommandBuilder::new(
        "addchannel",
        "Adds a Twitch channel to the list",
        CommandType::ChatInput,
    )
    .option(StringBuilder::new("channel", "The name of the Twitch channel").required(true))
}

pub fn create_removechannel_command() -> CommandBuilder {
    CommandBuilder::new(
        "removechannel",
        "Removes a Twitch channel from the list",
        CommandType::ChatInput,
    )
    .option(StringBuilder::new("channel", "The name of the Twitch channel").required(true))
}

pub fn create_listchannels_command() -> CommandBuilder {
    CommandBuilder::new(
        "listchannels",
        "Lists all Twitch channels",
        CommandType::ChatInput,
    )
}

/// Adds `name` to the registry and starts tracking it as offline.
pub async fn add_channel_reply(
    registry: &Arc<Mutex<ChannelRegistry>>,
    live_status: &Arc<Mutex<LiveStatusTable>>,
    name: &str,
) -> String {
    let mut reg = registry.lock().await;
    match reg.add(name) {
        Ok(AddOutcome::Added) => {
            live_status.lock().await.track(name);
            format!("Channel {name} added.")
        }
        Ok(AddOutcome::AlreadyPresent) => format!("Channel {name} is already in the list."),
        Err(e) => {
            error!("Failed to persist channel list after adding '{name}': {e}");
            format!("Failed to save channel {name}; the list is unchanged.")
        }
    }
}

/// Removes `name` from the registry and drops its live flag.
pub async fn remove_channel_reply(
    registry: &Arc<Mutex<ChannelRegistry>>,
    live_status: &Arc<Mutex<LiveStatusTable>>,
    name: &str,
) -> String {
    let mut reg = registry.lock().await;
    match reg.remove(name) {
        Ok(RemoveOutcome::Removed) => {
            live_status.lock().await.untrack(name);
            format!("Channel {name} removed.")
        }
        Ok(RemoveOutcome::NotFound) => format!("Channel {name} not found in the list."),
        Err(e) => {
            error!("Failed to persist channel list after removing '{name}': {e}");
            format!("Failed to save channel {name}; the list is unchanged.")
        }
    }
}

pub async fn list_channels_reply(registry: &Arc<Mutex<ChannelRegistry>>) -> String {
    let reg = registry.lock().await;
    if reg.is_empty() {
        "No channels in the list.".to_string()
    } else {
        format!("Channels: {}", reg.list().join(", "))
    }
}
