// File: streambell-core/src/services/discord/slashcommands/mod.rs

pub mod channels;
pub mod ping;

use std::sync::Arc;

use tokio::sync::Mutex;
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::interaction::{
        InteractionData,
        application_command::{CommandData, CommandOptionValue},
    },
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::Id,
    id::marker::{ApplicationMarker, InteractionMarker},
};

use streambell_common::models::twitch::LiveStatusTable;

use crate::Error;
use crate::repositories::channel_registry::ChannelRegistry;
use crate::services::discord::slashcommands::channels::{
    add_channel_reply, create_addchannel_command, create_listchannels_command,
    create_removechannel_command, list_channels_reply, remove_channel_reply,
};
use crate::services::discord::slashcommands::ping::{create_ping_command, ping_reply};

pub async fn register_global_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
) -> Result<(), Error> {
    let commands = &[
        create_ping_command().build(),
        create_addchannel_command().build(),
        create_removechannel_command().build(),
        create_listchannels_command().build(),
    ];

    http.interaction(application_id)
        .set_global_commands(commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

    Ok(())
}

/// Dispatch a slash command from an `InteractionCreate` and send its
/// single textual reply.
pub async fn handle_interaction_create(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    event: &InteractionCreate,
    registry: &Arc<Mutex<ChannelRegistry>>,
    live_status: &Arc<Mutex<LiveStatusTable>>,
) -> Result<(), Error> {
    let interaction = &event.0;
    let interaction_id = interaction.id;
    let interaction_token = &interaction.token;

    // Only handle ApplicationCommand interactions:
    let Some(InteractionData::ApplicationCommand(cmd_data)) = &interaction.data else {
        return Ok(());
    };

    let reply = match cmd_data.name.as_str() {
        "ping" => ping_reply(),
        "addchannel" => match option_str(cmd_data, "channel") {
            Some(name) => add_channel_reply(registry, live_status, name).await,
            None => "Missing required option `channel`.".to_string(),
        },
        "removechannel" => match option_str(cmd_data, "channel") {
            Some(name) => remove_channel_reply(registry, live_status, name).await,
            None => "Missing required option `channel`.".to_string(),
        },
        "listchannels" => list_channels_reply(registry).await,
        other => format!("Unrecognized command: {other}"),
    };

    respond_text(http, application_id, interaction_id, interaction_token, &reply).await
}

fn option_str<'a>(cmd: &'a CommandData, name: &str) -> Option<&'a str> {
    cmd.options.iter().find_map(|opt| {
        if opt.name == name {
            if let CommandOptionValue::String(s) = &opt.value {
                return Some(s.as_str());
            }
        }
        None
    })
}

async fn respond_text(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    interaction_id: Id<InteractionMarker>,
    interaction_token: &str,
    content: &str,
) -> Result<(), Error> {
    http.interaction(application_id)
        .create_response(
            interaction_id,
            interaction_token,
            &InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(InteractionResponseData {
                    content: Some(content.to_string()),
                    ..Default::default()
                }),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error responding to slash command: {e}")))?;

    Ok(())
}
