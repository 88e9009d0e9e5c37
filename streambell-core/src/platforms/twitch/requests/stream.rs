// ========================================================
// File: streambell-core/src/platforms/twitch/requests/stream.rs
// ========================================================
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use streambell_common::models::twitch::{ChannelInfo, StreamInfo};

use crate::Error;
use crate::platforms::twitch::client::TwitchHelixClient;

/// Response from "Get Streams" endpoint.
#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    pub data: Vec<StreamData>,
}

/// Single stream data record.
#[derive(Debug, Deserialize)]
pub struct StreamData {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub game_id: String,
    #[serde(rename = "type")]
    pub type_field: String, // e.g., "live"
    pub title: String,
}

/// Response from "Get Users" endpoint.
#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub data: Vec<UserData>,
}

/// Single user record.
#[derive(Debug, Deserialize)]
pub struct UserData {
    pub id: String,
    pub login: String,
    pub display_name: String,
}

/// Response from "Get Games" endpoint.
#[derive(Debug, Deserialize)]
pub struct GamesResponse {
    pub data: Vec<GameData>,
}

/// Single game record.
#[derive(Debug, Deserialize)]
pub struct GameData {
    pub id: String,
    pub name: String,
}

async fn get_json<T: DeserializeOwned>(
    client: &TwitchHelixClient,
    url: &str,
    query: &[(&str, &str)],
    what: &str,
) -> Result<T, Error> {
    let resp = client
        .http_client()
        .get(url)
        .query(query)
        .header("Client-Id", client.client_id())
        .header(
            "Authorization",
            format!("Bearer {}", client.bearer_token().await),
        )
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("{what} network error: {e}")))?;

    if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Credential(format!(
            "{what}: token rejected (HTTP 401)"
        )));
    }
    if !resp.status().is_success() {
        let status = resp.status();
        let body_text = resp.text().await.unwrap_or_default();
        return Err(Error::Upstream(format!(
            "{what}: HTTP {status} => {body_text}"
        )));
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Upstream(format!("{what} parse error: {e}")))
}

/// Batch-resolve channel names via "Get Users". Names unknown to the
/// platform are simply absent from the result.
pub async fn fetch_users(
    client: &TwitchHelixClient,
    logins: &[String],
) -> Result<Vec<ChannelInfo>, Error> {
    let query: Vec<(&str, &str)> = logins.iter().map(|l| ("login", l.as_str())).collect();
    let users: UsersResponse = get_json(
        client,
        "https://api.twitch.tv/helix/users",
        &query,
        "get users",
    )
    .await?;

    debug!(
        "Resolved {} of {} registered channel(s)",
        users.data.len(),
        logins.len()
    );

    Ok(users
        .data
        .into_iter()
        .map(|u| ChannelInfo {
            user_id: u.id,
            login: u.login,
            display_name: u.display_name,
        })
        .collect())
}

/// Batch-fetch the currently-live streams among `user_ids`.
pub async fn fetch_live_streams(
    client: &TwitchHelixClient,
    user_ids: &[String],
) -> Result<Vec<StreamInfo>, Error> {
    let query: Vec<(&str, &str)> = user_ids.iter().map(|id| ("user_id", id.as_str())).collect();
    let streams: StreamsResponse = get_json(
        client,
        "https://api.twitch.tv/helix/streams",
        &query,
        "get streams",
    )
    .await?;

    Ok(streams
        .data
        .into_iter()
        .map(|s| StreamInfo {
            user_id: s.user_id,
            user_login: s.user_login,
            user_name: s.user_name,
            game_id: s.game_id,
        })
        .collect())
}

/// Resolve a game id to its display name via "Get Games".
pub async fn fetch_game_name(
    client: &TwitchHelixClient,
    game_id: &str,
) -> Result<Option<String>, Error> {
    if game_id.is_empty() {
        return Ok(None);
    }
    let games: GamesResponse = get_json(
        client,
        "https://api.twitch.tv/helix/games",
        &[("id", game_id)],
        "get games",
    )
    .await?;
    Ok(games.data.into_iter().next().map(|g| g.name))
}
