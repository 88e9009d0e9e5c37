// tests/channel_registry_tests.rs

use std::path::PathBuf;

use streambell_core::Error;
use streambell_core::repositories::channel_registry::{
    AddOutcome, ChannelRegistry, RemoveOutcome,
};
use tempfile::TempDir;

fn registry_path(dir: &TempDir) -> PathBuf {
    dir.path().join("channels.json")
}

#[test]
fn missing_file_loads_empty() -> Result<(), Error> {
    let dir = TempDir::new()?;
    let reg = ChannelRegistry::load(registry_path(&dir))?;
    assert!(reg.is_empty());
    Ok(())
}

#[test]
fn add_then_reload_round_trips_in_order() -> Result<(), Error> {
    let dir = TempDir::new()?;
    let path = registry_path(&dir);

    let mut reg = ChannelRegistry::load(&path)?;
    assert_eq!(reg.add("alice")?, AddOutcome::Added);
    assert_eq!(reg.add("bob")?, AddOutcome::Added);
    assert_eq!(reg.add("carol")?, AddOutcome::Added);

    let reloaded = ChannelRegistry::load(&path)?;
    assert_eq!(reloaded.list(), ["alice", "bob", "carol"]);
    Ok(())
}

#[test]
fn duplicate_add_reports_already_present() -> Result<(), Error> {
    let dir = TempDir::new()?;
    let mut reg = ChannelRegistry::load(registry_path(&dir))?;

    assert_eq!(reg.add("bob")?, AddOutcome::Added);
    assert_eq!(reg.add("bob")?, AddOutcome::AlreadyPresent);
    assert_eq!(reg.len(), 1);
    Ok(())
}

#[test]
fn remove_reports_not_found() -> Result<(), Error> {
    let dir = TempDir::new()?;
    let mut reg = ChannelRegistry::load(registry_path(&dir))?;

    assert_eq!(reg.remove("ghost")?, RemoveOutcome::NotFound);
    Ok(())
}

#[test]
fn remove_persists_immediately() -> Result<(), Error> {
    let dir = TempDir::new()?;
    let path = registry_path(&dir);

    let mut reg = ChannelRegistry::load(&path)?;
    reg.add("alice")?;
    reg.add("bob")?;
    assert_eq!(reg.remove("alice")?, RemoveOutcome::Removed);

    let reloaded = ChannelRegistry::load(&path)?;
    assert_eq!(reloaded.list(), ["bob"]);
    Ok(())
}

#[test]
fn corrupt_file_is_a_persistence_error() {
    let dir = TempDir::new().unwrap();
    let path = registry_path(&dir);
    std::fs::write(&path, "{ not json").unwrap();

    let err = ChannelRegistry::load(&path).unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
}

#[test]
fn corrupt_file_degrades_to_empty_list() {
    let dir = TempDir::new().unwrap();
    let path = registry_path(&dir);
    std::fs::write(&path, "[\"alice\", oops").unwrap();

    let reg = ChannelRegistry::load_or_default(&path);
    assert!(reg.is_empty());
}

#[test]
fn persisted_form_is_a_pretty_json_array() -> Result<(), Error> {
    let dir = TempDir::new()?;
    let path = registry_path(&dir);

    let mut reg = ChannelRegistry::load(&path)?;
    reg.add("alice")?;
    reg.add("bob")?;

    let raw = std::fs::read_to_string(&path)?;
    let parsed: Vec<String> = serde_json::from_str(&raw)?;
    assert_eq!(parsed, ["alice", "bob"]);
    // Pretty-printed, one entry per line.
    assert!(raw.contains('\n'));
    Ok(())
}
