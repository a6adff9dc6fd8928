//! Followed artists, keyed by artist id.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub artist_id: String,
    pub artist: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    entries: BTreeMap<String, WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the artist was already watched; the existing entry
    /// is kept.
    pub fn add(&mut self, entry: WatchlistEntry) -> bool {
        if self.entries.contains_key(&entry.artist_id) {
            return false;
        }
        self.entries.insert(entry.artist_id.clone(), entry);
        true
    }

    pub fn remove(&mut self, artist_id: &str) -> Option<WatchlistEntry> {
        self.entries.remove(artist_id)
    }

    /// Adds the entry if absent, removes it otherwise. Returns whether the
    /// artist is watched afterwards.
    pub fn toggle(&mut self, entry: WatchlistEntry) -> bool {
        if self.entries.remove(&entry.artist_id).is_some() {
            false
        } else {
            self.entries.insert(entry.artist_id.clone(), entry);
            true
        }
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.entries.contains_key(artist_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchlistEntry> {
        self.entries.values()
    }
}
