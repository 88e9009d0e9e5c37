// tests/command_reply_tests.rs
//
// Reply semantics of the channel-management commands: one human-readable
// reply per invocation, with "already exists" / "not found" as normal
// outcomes.

use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::Mutex;

use streambell_common::models::twitch::LiveStatusTable;
use streambell_core::repositories::channel_registry::ChannelRegistry;
use streambell_core::services::discord::slashcommands::channels::{
    add_channel_reply, list_channels_reply, remove_channel_reply,
};
use streambell_core::services::discord::slashcommands::ping::ping_reply;

fn empty_state(dir: &TempDir) -> (Arc<Mutex<ChannelRegistry>>, Arc<Mutex<LiveStatusTable>>) {
    let reg = ChannelRegistry::load(dir.path().join("channels.json")).unwrap();
    (
        Arc::new(Mutex::new(reg)),
        Arc::new(Mutex::new(LiveStatusTable::new())),
    )
}

#[test]
fn ping_replies_pong() {
    assert_eq!(ping_reply(), "Pong!");
}

#[tokio::test]
async fn add_twice_reports_already_present() {
    let dir = TempDir::new().unwrap();
    let (registry, table) = empty_state(&dir);

    let first = add_channel_reply(&registry, &table, "bob").await;
    assert_eq!(first, "Channel bob added.");

    let second = add_channel_reply(&registry, &table, "bob").await;
    assert_eq!(second, "Channel bob is already in the list.");

    assert_eq!(registry.lock().await.len(), 1);
    assert!(table.lock().await.contains("bob"));
    assert!(!table.lock().await.is_live("bob"));
}

#[tokio::test]
async fn remove_drops_the_live_flag_entry() {
    let dir = TempDir::new().unwrap();
    let (registry, table) = empty_state(&dir);

    add_channel_reply(&registry, &table, "alice").await;
    table.lock().await.set_live("alice", true);

    let reply = remove_channel_reply(&registry, &table, "alice").await;
    assert_eq!(reply, "Channel alice removed.");
    assert!(registry.lock().await.is_empty());
    assert!(!table.lock().await.contains("alice"));
}

#[tokio::test]
async fn remove_missing_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let (registry, table) = empty_state(&dir);

    let reply = remove_channel_reply(&registry, &table, "ghost").await;
    assert_eq!(reply, "Channel ghost not found in the list.");
}

#[tokio::test]
async fn list_reflects_insertion_order() {
    let dir = TempDir::new().unwrap();
    let (registry, table) = empty_state(&dir);

    assert_eq!(list_channels_reply(&registry).await, "No channels in the list.");

    add_channel_reply(&registry, &table, "alice").await;
    add_channel_reply(&registry, &table, "bob").await;

    assert_eq!(list_channels_reply(&registry).await, "Channels: alice, bob");
}
