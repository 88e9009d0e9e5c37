use std::collections::HashMap;

/// A channel identity resolved through the "Get Users" endpoint.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub user_id: String,
    pub login: String,
    pub display_name: String,
}

/// A currently-live stream record from the "Get Streams" endpoint.
#[derive(Debug, Clone)]
pub struct StreamInfo {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub game_id: String,
}

/// Last-known live flag per registered channel name.
///
/// Keys are the names exactly as registered; resolved platform identities
/// are matched back to them case-insensitively. Entries exist only for
/// channels currently in the registry: `track` on add, `untrack` on remove.
#[derive(Debug, Default)]
pub struct LiveStatusTable {
    status: HashMap<String, bool>,
}

impl LiveStatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `name` as offline. An existing flag is kept.
    pub fn track(&mut self, name: &str) {
        self.status.entry(name.to_string()).or_insert(false);
    }

    pub fn untrack(&mut self, name: &str) {
        self.status.remove(name);
    }

    pub fn is_live(&self, name: &str) -> bool {
        self.status.get(name).copied().unwrap_or(false)
    }

    /// Flips the flag for a tracked channel. Untracked names are ignored,
    /// so a channel removed mid-pass never re-enters the table.
    pub fn set_live(&mut self, name: &str, live: bool) {
        if let Some(flag) = self.status.get_mut(name) {
            *flag = live;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.status.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_initializes_offline_and_keeps_existing_flags() {
        let mut table = LiveStatusTable::new();
        table.track("alice");
        assert!(!table.is_live("alice"));

        table.set_live("alice", true);
        table.track("alice");
        assert!(table.is_live("alice"));
    }

    #[test]
    fn set_live_ignores_untracked_names() {
        let mut table = LiveStatusTable::new();
        table.set_live("ghost", true);
        assert!(!table.contains("ghost"));
        assert!(!table.is_live("ghost"));
    }

    #[test]
    fn untrack_drops_the_entry() {
        let mut table = LiveStatusTable::new();
        table.track("alice");
        table.untrack("alice");
        assert!(table.is_empty());
    }
}
