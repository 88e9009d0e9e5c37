// File: streambell-core/src/repositories/channel_registry.rs

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::error;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Ordered, duplicate-free list of watched channel names, persisted as a
/// pretty-printed JSON array and fully rewritten on every mutation.
#[derive(Debug)]
pub struct ChannelRegistry {
    path: PathBuf,
    channels: Vec<String>,
}

impl ChannelRegistry {
    /// Loads the registry from `path`. A missing file is an empty registry;
    /// an unreadable or unparsable file is a `Persistence` error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                channels: Vec::new(),
            });
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| Error::Persistence(format!("reading {}: {e}", path.display())))?;
        let channels: Vec<String> = serde_json::from_str(&raw)
            .map_err(|e| Error::Persistence(format!("parsing {}: {e}", path.display())))?;
        Ok(Self { path, channels })
    }

    /// Like [`ChannelRegistry::load`], but degrades a corrupt file to an
    /// empty registry instead of failing. The damaged file stays on disk
    /// until the next mutation overwrites it.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(&path) {
            Ok(registry) => registry,
            Err(e) => {
                error!(
                    "Channel list at {} is unreadable ({e}); starting with an empty list",
                    path.display()
                );
                Self {
                    path,
                    channels: Vec::new(),
                }
            }
        }
    }

    /// Appends `name` and persists. Reports `AlreadyPresent` without
    /// touching storage when the name is already a member.
    pub fn add(&mut self, name: &str) -> Result<AddOutcome, Error> {
        if self.channels.iter().any(|c| c == name) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        self.channels.push(name.to_string());
        if let Err(e) = self.persist() {
            self.channels.pop();
            return Err(e);
        }
        Ok(AddOutcome::Added)
    }

    /// Removes `name` and persists. Reports `NotFound` when absent.
    pub fn remove(&mut self, name: &str) -> Result<RemoveOutcome, Error> {
        let Some(idx) = self.channels.iter().position(|c| c == name) else {
            return Ok(RemoveOutcome::NotFound);
        };
        let removed = self.channels.remove(idx);
        if let Err(e) = self.persist() {
            self.channels.insert(idx, removed);
            return Err(e);
        }
        Ok(RemoveOutcome::Removed)
    }

    /// Current ordered list of channel names.
    pub fn list(&self) -> &[String] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the whole list, write-temp-then-rename, so a crash
    /// mid-write never leaves a half-written file for the next load.
    pub fn persist(&self) -> Result<(), Error> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let json = serde_json::to_string_pretty(&self.channels)?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| {
            Error::Persistence(format!("creating temp file in {}: {e}", parent.display()))
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| Error::Persistence(format!("writing channel list: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Persistence(format!("replacing {}: {e}", self.path.display())))?;
        Ok(())
    }
}
