//! Title search index
//!
//! A binary search tree keyed by lowercased title. The tree is never patched
//! in place; it is rebuilt from a full store traversal after each structural
//! change. Nodes live in a flat vector and link by position, and both
//! insertion and lookup walk the tree iteratively, so a skewed tree (for
//! example one built from an already title-sorted library) cannot exhaust
//! the call stack.

use super::store::{RecordStore, TrackId};

#[derive(Debug, Clone)]
struct IndexNode {
    key: String,
    id: TrackId,
    left: Option<usize>,
    right: Option<usize>,
}

/// Prefix lookup over track titles
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    nodes: Vec<IndexNode>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over every track in the store
    pub fn build(store: &RecordStore) -> Self {
        let mut index = Self::new();
        index.rebuild(store);
        index
    }

    /// Discard the tree and reinsert every track in store order
    pub fn rebuild(&mut self, store: &RecordStore) {
        self.nodes.clear();
        for (id, track) in store.iter() {
            self.insert(track.title.to_lowercase(), id);
        }
        log::debug!("Search index rebuilt with {} entries", self.nodes.len());
    }

    /// Probe for a title starting with `query`
    ///
    /// This is a single-path descent, not a range query: the first node on the
    /// path whose key starts with the query wins, otherwise the walk branches
    /// left when `query < key` and right otherwise. The answer is whichever
    /// match the walk reaches first, which is not necessarily the
    /// lexicographically smallest title with that prefix.
    ///
    /// The query is lowercased before comparison.
    pub fn find_prefix(&self, query: &str) -> Option<TrackId> {
        let query = query.to_lowercase();
        let mut cursor = self.root();

        while let Some(pos) = cursor {
            let node = &self.nodes[pos];
            if node.key.starts_with(&query) {
                return Some(node.id);
            }
            cursor = if query.as_str() < node.key.as_str() {
                node.left
            } else {
                node.right
            };
        }

        None
    }

    /// Handles in key order (in-order traversal)
    pub fn in_order(&self) -> Vec<TrackId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root();

        while cursor.is_some() || !stack.is_empty() {
            while let Some(pos) = cursor {
                stack.push(pos);
                cursor = self.nodes[pos].left;
            }
            if let Some(pos) = stack.pop() {
                out.push(self.nodes[pos].id);
                cursor = self.nodes[pos].right;
            }
        }

        out
    }

    /// Height of the tree, zero when empty
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();

        while let Some((pos, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[pos];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }

        deepest
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    // Equal keys go right, so duplicates keep their insertion order.
    fn insert(&mut self, key: String, id: TrackId) {
        let new_pos = self.nodes.len();
        let mut cursor = self.root();

        while let Some(pos) = cursor {
            let node = &mut self.nodes[pos];
            let slot = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
            match *slot {
                Some(child) => cursor = Some(child),
                None => {
                    *slot = Some(new_pos);
                    break;
                }
            }
        }

        self.nodes.push(IndexNode {
            key,
            id,
            left: None,
            right: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;
    use std::path::Path;

    fn store_of(titles: &[&str]) -> (RecordStore, Vec<TrackId>) {
        let mut store = RecordStore::new();
        let ids = titles
            .iter()
            .enumerate()
            .map(|(i, t)| {
                store
                    .append(t, "Artist", Path::new(&format!("/{i}.mp3")), Mood::Chill)
                    .unwrap()
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_empty_index_finds_nothing() {
        let index = SearchIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.find_prefix("a"), None);
        assert_eq!(index.depth(), 0);
    }

    #[test]
    fn test_in_order_is_sorted_by_lowercase_title() {
        let (store, _) = store_of(&["Mango", "apple", "Zebra", "banana", "Cherry"]);
        let index = SearchIndex::build(&store);

        let keys: Vec<String> = index
            .in_order()
            .into_iter()
            .map(|id| store.get(id).unwrap().title.to_lowercase())
            .collect();
        assert_eq!(keys, vec!["apple", "banana", "cherry", "mango", "zebra"]);
    }

    #[test]
    fn test_equal_titles_keep_insertion_order() {
        let (store, ids) = store_of(&["Same", "same", "SAME"]);
        let index = SearchIndex::build(&store);
        assert_eq!(index.in_order(), ids);
    }

    #[test]
    fn test_find_prefix_matches_on_path() {
        let (store, ids) = store_of(&["Mango", "Apple", "Zebra"]);
        let index = SearchIndex::build(&store);

        assert_eq!(index.find_prefix("man"), Some(ids[0]));
        assert_eq!(index.find_prefix("ZEB"), Some(ids[2]));
        assert_eq!(index.find_prefix("app"), Some(ids[1]));
        assert_eq!(index.find_prefix("kiwi"), None);
    }

    #[test]
    fn test_empty_query_matches_root() {
        let (store, ids) = store_of(&["Mango", "Apple"]);
        let index = SearchIndex::build(&store);
        assert_eq!(index.find_prefix(""), Some(ids[0]));
    }

    #[test]
    fn test_find_prefix_returns_first_match_on_path_not_smallest() {
        // "ab" is the root, "aa" sits to its left. Both start with "a", but the
        // walk stops at the root.
        let (store, ids) = store_of(&["ab", "b", "aa"]);
        let index = SearchIndex::build(&store);

        assert_eq!(index.find_prefix("a"), Some(ids[0]));
        assert_eq!(index.find_prefix("aa"), Some(ids[2]));
        assert_eq!(index.find_prefix("b"), Some(ids[1]));
    }

    #[test]
    fn test_find_prefix_prefers_earlier_inserted_title() {
        let (store, ids) = store_of(&["Song B", "Song A"]);
        let index = SearchIndex::build(&store);
        assert_eq!(index.find_prefix("song"), Some(ids[0]));
    }

    #[test]
    fn test_find_prefix_finds_some_match_whenever_one_exists() {
        let names = [
            "delta", "alpha", "echo", "bravo", "charlie", "alphabet", "del", "foxtrot", "al",
        ];
        let (store, _) = store_of(&names);
        let index = SearchIndex::build(&store);

        for query in ["a", "al", "alpha", "alphab", "b", "c", "d", "de", "e", "f", "z", "alx"] {
            let expected = names.iter().any(|n| n.starts_with(query));
            let found = index.find_prefix(query);
            assert_eq!(found.is_some(), expected, "query {query:?}");
            if let Some(id) = found {
                assert!(store.get(id).unwrap().title.starts_with(query));
            }
        }
    }

    #[test]
    fn test_sorted_input_builds_deep_tree_without_recursion() {
        let titles: Vec<String> = (0..5000).map(|i| format!("track {i:05}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let (store, ids) = store_of(&refs);
        let index = SearchIndex::build(&store);

        assert_eq!(index.len(), 5000);
        assert_eq!(index.depth(), 5000);
        assert_eq!(index.find_prefix("track 04999"), Some(ids[4999]));
    }

    #[test]
    fn test_rebuild_drops_deleted_tracks() {
        let (mut store, ids) = store_of(&["Song A", "Song B"]);
        let mut index = SearchIndex::build(&store);
        store.delete(ids[0]).unwrap();
        index.rebuild(&store);

        assert_eq!(index.len(), 1);
        assert_eq!(index.find_prefix("song a"), None);
    }
}
