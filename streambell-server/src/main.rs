use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use streambell_core::Error;
use streambell_core::platforms::discord::{DiscordNotifier, DiscordPlatform};
use streambell_core::platforms::{Notifier, PlatformAuth, PlatformIntegration};
use streambell_core::services::discord::slashcommands::{
    handle_interaction_create, register_global_slash_commands,
};
use streambell_core::tasks::credential_refresh::spawn_credential_refresh_task;
use streambell_core::tasks::stream_watch::spawn_stream_watch_task;

mod config;
mod context;

use config::AppConfig;
use context::ServerContext;

#[derive(Parser, Debug, Clone)]
#[command(name = "streambell")]
#[command(author, version, about = "Announces Twitch live status into Discord")]
struct Args {
    /// Path to the persisted channel list (fallback when
    /// CHANNELS_FILE_PATH is unset)
    #[arg(long, default_value = "channels.json")]
    channels_file: String,

    /// Seconds between live-status polls
    #[arg(long, default_value_t = 10)]
    poll_interval_secs: u64,

    /// Seconds between scheduled token checks
    #[arg(long, default_value_t = 3600)]
    token_refresh_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("streambell=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub).expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let config = match AppConfig::from_env(&args.channels_file) {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {e}");
            return Err(e.into());
        }
    };

    info!(
        "streambell starting. poll={}s, refresh={}s, channels_file={}",
        args.poll_interval_secs, args.token_refresh_secs, config.channels_file_path
    );

    if let Err(e) = run_server(args, config).await {
        error!("Server error: {e:?}");
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run_server(args: Args, config: AppConfig) -> Result<(), Error> {
    let ctx = ServerContext::new(&config);

    // Token upkeep: immediate validation at startup, then on a schedule.
    let refresh_handle = spawn_credential_refresh_task(
        ctx.auth.clone(),
        Duration::from_secs(args.token_refresh_secs),
    );

    let mut discord = DiscordPlatform::new(config.discord_bot_token.clone());
    discord.authenticate().await?;
    discord.connect().await?;

    let http = discord
        .http
        .clone()
        .ok_or_else(|| Error::Platform("Discord HTTP client missing after connect".into()))?;

    let application_id = discord.application_id().await?;
    register_global_slash_commands(&http, application_id).await?;
    info!("Registered application (/) commands.");

    // Announcements go to the fixed configured channel. A bad destination
    // disables announcements but does not stop the bot.
    let notifier: Option<Arc<dyn Notifier>> =
        match DiscordNotifier::new(http.clone(), &config.discord_channel_id) {
            Ok(n) => Some(Arc::new(n)),
            Err(e) => {
                error!("Announce channel unusable; live checks disabled: {e}");
                None
            }
        };

    let watch_handle = notifier.map(|notifier| {
        spawn_stream_watch_task(
            ctx.helix.clone(),
            notifier,
            ctx.registry.clone(),
            ctx.live_status.clone(),
            Duration::from_secs(args.poll_interval_secs),
        )
    });

    // Command dispatch loop; ends on Ctrl-C.
    loop {
        tokio::select! {
            maybe_interaction = discord.next_interaction() => {
                match maybe_interaction {
                    Some(event) => {
                        if let Err(e) = handle_interaction_create(
                            &http,
                            application_id,
                            &event,
                            &ctx.registry,
                            &ctx.live_status,
                        )
                        .await
                        {
                            error!("Slash command handling failed: {e}");
                        }
                    }
                    None => {
                        error!("Discord interaction stream ended; shutting down.");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C detected; shutting down.");
                break;
            }
        }
    }

    if let Some(handle) = watch_handle {
        handle.abort();
    }
    refresh_handle.abort();
    discord.disconnect().await?;

    Ok(())
}
