//! Stable merge sort over the store's linked sequence
//!
//! Nodes are relinked in place; no track is copied or recreated. The split
//! step recurses to O(log n) depth and the merge step is a loop, so the
//! stack stays shallow for any library size.

use super::store::{RecordStore, TrackId};
use std::fmt;
use std::str::FromStr;

/// Field a library can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Artist,
}

impl SortKey {
    fn key_of(self, store: &RecordStore, id: TrackId) -> String {
        store
            .get(id)
            .map(|track| match self {
                SortKey::Title => track.title.to_lowercase(),
                SortKey::Artist => track.artist.to_lowercase(),
            })
            .unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "artist" => Ok(SortKey::Artist),
            other => Err(format!("unknown sort key '{other}' (expected title or artist)")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => f.write_str("title"),
            SortKey::Artist => f.write_str("artist"),
        }
    }
}

/// Sort the store by `key` (case-insensitive) and return the new head
///
/// Equal keys keep their previous relative order. Empty and single-track
/// libraries are left untouched.
pub fn sort(store: &mut RecordStore, key: SortKey) -> Option<TrackId> {
    let head = store.head();
    if store.len() < 2 {
        return head;
    }

    let new_head = merge_sort(store, head, key);
    store.replace_order(new_head);
    log::info!("Sorted {} tracks by {}", store.len(), key);
    new_head
}

fn merge_sort(store: &mut RecordStore, head: Option<TrackId>, key: SortKey) -> Option<TrackId> {
    let first = head?;
    if store.next(first).is_none() {
        return head;
    }

    let back = split(store, first);
    let front = merge_sort(store, Some(first), key);
    let back = merge_sort(store, back, key);
    merge(store, front, back, key)
}

/// Cut the chain after its middle; the front half keeps the odd element
fn split(store: &mut RecordStore, source: TrackId) -> Option<TrackId> {
    let mut slow = source;
    let mut fast = store.next(source);

    while let Some(f) = fast {
        fast = store.next(f);
        if let Some(f2) = fast {
            if let Some(s) = store.next(slow) {
                slow = s;
            }
            fast = store.next(f2);
        }
    }

    let back = store.next(slow);
    store.set_next(slow, None);
    if let Some(b) = back {
        store.set_prev(b, None);
    }
    back
}

fn merge(
    store: &mut RecordStore,
    mut a: Option<TrackId>,
    mut b: Option<TrackId>,
    key: SortKey,
) -> Option<TrackId> {
    let mut head = None;
    let mut tail: Option<TrackId> = None;

    loop {
        let picked = match (a, b) {
            (Some(x), Some(y)) => {
                // `<=` takes from the front half on ties
                if key.key_of(store, x) <= key.key_of(store, y) {
                    a = store.next(x);
                    x
                } else {
                    b = store.next(y);
                    y
                }
            }
            (Some(rest), None) | (None, Some(rest)) => {
                attach(store, &mut head, tail, rest);
                break;
            }
            (None, None) => break,
        };
        attach(store, &mut head, tail, picked);
        tail = Some(picked);
    }

    head
}

fn attach(store: &mut RecordStore, head: &mut Option<TrackId>, tail: Option<TrackId>, id: TrackId) {
    store.set_prev(id, tail);
    match tail {
        Some(t) => store.set_next(t, Some(id)),
        None => *head = Some(id),
    }
}
