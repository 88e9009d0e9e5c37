use std::sync::Arc;

use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::error;

use crate::platforms::twitch::TwitchAuthState;

/// Margin kept comfortably above the polling period so a token never
/// expires between two scheduled checks.
const EXPIRY_MARGIN_SECS: i64 = 600;

/// Spawns the scheduled token check: validate immediately at startup, then
/// once per `period`. A failed refresh keeps the stale token and is
/// retried on the next pass (or sooner, if a platform call is rejected).
pub fn spawn_credential_refresh_task(
    auth: Arc<TwitchAuthState>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = auth.ensure_valid(EXPIRY_MARGIN_SECS).await {
                error!("Scheduled Twitch token check failed; keeping the current token: {e}");
            }
        }
    })
}
