use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use streambell_common::models::twitch::LiveStatusTable;
use streambell_common::traits::platform_traits::{Notifier, StreamSource};

use crate::Error;
use crate::platforms::twitch::TwitchHelixClient;
use crate::repositories::channel_registry::ChannelRegistry;

/// One polling pass: diff the platform's live state for every registered
/// channel against the last-known flags and announce offline-to-live edges.
///
/// An empty registry makes no upstream calls. Any upstream failure aborts
/// the remainder of the pass; flags keep their values from the last
/// successful pass and the next one runs independently.
pub async fn check_live_streams(
    source: &dyn StreamSource,
    notifier: &dyn Notifier,
    registry: &Arc<Mutex<ChannelRegistry>>,
    live_status: &Arc<Mutex<LiveStatusTable>>,
) -> Result<(), Error> {
    let names: Vec<String> = registry.lock().await.list().to_vec();
    if names.is_empty() {
        debug!("No channels registered; skipping live check");
        return Ok(());
    }

    let users = source.users_by_login(&names).await?;
    if users.is_empty() {
        debug!("None of the registered channels resolved upstream");
        return Ok(());
    }

    let user_ids: Vec<String> = users.iter().map(|u| u.user_id.clone()).collect();
    let streams = source.live_streams(&user_ids).await?;

    for user in &users {
        // Map the resolved identity back to the name as registered.
        let Some(registered) = names.iter().find(|n| n.eq_ignore_ascii_case(&user.login)) else {
            continue;
        };

        let stream = streams.iter().find(|s| s.user_id == user.user_id);
        let was_live = live_status.lock().await.is_live(registered);

        match (stream, was_live) {
            (Some(stream), false) => {
                live_status.lock().await.set_live(registered, true);

                let game = source
                    .game_name(&stream.game_id)
                    .await?
                    .unwrap_or_else(|| "Unknown Game".to_string());
                let text = format!(
                    "Twitch channel {} is now live! They are playing {}. Watch here: https://www.twitch.tv/{}",
                    user.display_name, game, user.login
                );
                info!("{} went live (playing {})", user.display_name, game);

                if let Err(e) = notifier.notify(&text).await {
                    warn!("Failed to deliver live announcement for {}: {e}", user.login);
                }
            }
            (None, true) => {
                // Live-to-offline is silent.
                debug!("{} went offline", user.login);
                live_status.lock().await.set_live(registered, false);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Spawns the periodic polling task. Passes never overlap: the body is
/// awaited inline and missed ticks are delayed rather than bursted.
pub fn spawn_stream_watch_task(
    client: Arc<TwitchHelixClient>,
    notifier: Arc<dyn Notifier>,
    registry: Arc<Mutex<ChannelRegistry>>,
    live_status: Arc<Mutex<LiveStatusTable>>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) =
                check_live_streams(client.as_ref(), notifier.as_ref(), &registry, &live_status)
                    .await
            {
                error!("Live status check failed: {e}");
                // A rejected token gets refreshed out of band; the pass
                // itself is not retried.
                if matches!(e, Error::Credential(_)) {
                    if let Err(refresh_err) = client.auth().refresh().await {
                        error!("Token refresh after rejection failed: {refresh_err}");
                    }
                }
            }
        }
    })
}
