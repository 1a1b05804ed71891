//! Recently-played stack

use super::store::TrackId;

/// Stack of previously current tracks, most recent on top
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<TrackId>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `previous` when playback moves away from it
    ///
    /// Nothing is pushed when there was no previous track or when the
    /// selection did not change. Returns whether an entry was added.
    pub fn record_play(&mut self, previous: Option<TrackId>, new_current: TrackId) -> bool {
        match previous {
            Some(prev) if prev != new_current => {
                self.entries.push(prev);
                true
            }
            _ => false,
        }
    }

    /// Most recent entry, left in place
    pub fn last(&self) -> Option<TrackId> {
        self.entries.last().copied()
    }

    /// Take the most recent entry
    pub fn pop_last(&mut self) -> Option<TrackId> {
        self.entries.pop()
    }

    /// Drop every entry; run on each delete
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("History invalidated ({} entries dropped)", self.entries.len());
        }
        self.entries.clear();
    }

    /// Entries from most to least recent
    pub fn iter(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.entries.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
