//! Ordered record storage
//!
//! Tracks live in an arena of generation-checked slots and are chained into a
//! doubly-linked sequence through handles. Everything outside the store holds
//! a [`TrackId`]; a handle whose slot was freed (or reused) simply stops
//! resolving instead of dangling.

use crate::error::LibraryError;
use crate::model::{Mood, Track};
use std::path::Path;

/// Stable handle to a track in a [`RecordStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node {
    track: Track,
    prev: Option<TrackId>,
    next: Option<TrackId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owner of every track, kept in library order
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<TrackId>,
    tail: Option<TrackId>,
    len: usize,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new non-favorite track at the end of the sequence
    ///
    /// Fails with [`LibraryError::Duplicate`] when a track with exactly the
    /// same path is already present.
    pub fn append(
        &mut self,
        title: &str,
        artist: &str,
        path: &Path,
        mood: Mood,
    ) -> Result<TrackId, LibraryError> {
        self.push(Track::new(title, artist, path, mood))
    }

    /// Link a fully built track at the tail, enforcing path uniqueness
    pub fn push(&mut self, track: Track) -> Result<TrackId, LibraryError> {
        if self.find_by_path(&track.file_path).is_some() {
            return Err(LibraryError::Duplicate {
                path: track.file_path,
            });
        }

        let id = self.allocate(Node {
            track,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.set_next(tail, Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;

        Ok(id)
    }

    /// Unlink a track and hand back its data
    ///
    /// The slot is released and its generation bumped, so every outstanding
    /// copy of `id` stops resolving.
    pub fn delete(&mut self, id: TrackId) -> Result<Track, LibraryError> {
        let (prev, next) = {
            let node = self.node(id).ok_or(LibraryError::NotFound)?;
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }

        let slot = &mut self.slots[id.index as usize];
        let node = slot.node.take().ok_or(LibraryError::NotFound)?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        Ok(node.track)
    }

    /// Adopt a new head after an external relink and recompute the tail
    pub fn replace_order(&mut self, new_head: Option<TrackId>) {
        if let Some(head) = new_head {
            self.set_prev(head, None);
        }
        self.head = new_head;

        let mut tail = new_head;
        while let Some(next) = tail.and_then(|id| self.next(id)) {
            tail = Some(next);
        }
        self.tail = tail;
    }

    /// Forward traversal from the head
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Backward traversal from the tail
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.tail,
            forward: false,
        }
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.node(id).map(|n| &n.track)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.node_mut(id).map(|n| &mut n.track)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.node(id).is_some()
    }

    pub fn head(&self) -> Option<TrackId> {
        self.head
    }

    pub fn tail(&self) -> Option<TrackId> {
        self.tail
    }

    /// Successor in library order
    pub fn next(&self, id: TrackId) -> Option<TrackId> {
        self.node(id).and_then(|n| n.next)
    }

    /// Predecessor in library order
    pub fn prev(&self, id: TrackId) -> Option<TrackId> {
        self.node(id).and_then(|n| n.prev)
    }

    /// Find a track by its exact (case-sensitive) path
    pub fn find_by_path(&self, path: &Path) -> Option<TrackId> {
        self.iter()
            .find(|(_, track)| track.file_path == path)
            .map(|(id, _)| id)
    }

    /// First track in library order whose title equals `title` exactly
    pub fn find_by_title(&self, title: &str) -> Option<TrackId> {
        self.iter()
            .find(|(_, track)| track.title == title)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn set_next(&mut self, id: TrackId, next: Option<TrackId>) {
        if let Some(node) = self.node_mut(id) {
            node.next = next;
        }
    }

    pub(crate) fn set_prev(&mut self, id: TrackId, prev: Option<TrackId>) {
        if let Some(node) = self.node_mut(id) {
            node.prev = prev;
        }
    }

    fn allocate(&mut self, node: Node) -> TrackId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return TrackId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        TrackId {
            index,
            generation: 0,
        }
    }

    fn node(&self, id: TrackId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: TrackId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }
}

/// Traversal over a [`RecordStore`] in either direction
pub struct Iter<'a> {
    store: &'a RecordStore,
    cursor: Option<TrackId>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (TrackId, &'a Track);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.store.node(id)?;
        self.cursor = if self.forward { node.next } else { node.prev };
        Some((id, &node.track))
    }
}
