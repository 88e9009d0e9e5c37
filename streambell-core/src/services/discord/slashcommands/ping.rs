// File: streambell-core/src/services/discord/slashcommands/ping.rs

use twilight_model::application::command::CommandType;
use twilight_util::builder::command::CommandBuilder;

/// Create a CommandBuilder for `/ping`.
pub fn create_ping_command() -> CommandBuilder {
    CommandBuilder::new("ping", "Replies with Pong!", CommandType::ChatInput)
        .dm_permission(true)
}

pub fn ping_reply() -> String {
    "Pong!".to_string()
}
