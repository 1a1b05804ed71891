use moodbox::library::{sort, RecordStore, SearchIndex, SortKey, TrackId};
use moodbox::model::Mood;
use proptest::prelude::*;
use std::path::Path;

#[derive(Debug, Clone)]
enum Op {
    Add { title: String, artist: String, path: u8 },
    Delete(usize),
    Sort(SortKey),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => ("[a-cA-C]{0,3}", "[xyXY]{0,2}", 0u8..24)
            .prop_map(|(title, artist, path)| Op::Add { title, artist, path }),
        2 => (0usize..32).prop_map(Op::Delete),
        1 => prop_oneof![Just(SortKey::Title), Just(SortKey::Artist)].prop_map(Op::Sort),
    ]
}

fn assert_bidirectional(store: &RecordStore) {
    let forward: Vec<TrackId> = store.iter().map(|(id, _)| id).collect();
    let mut backward: Vec<TrackId> = store.iter_rev().map(|(id, _)| id).collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), store.len());
    assert_eq!(store.head(), forward.first().copied());
    assert_eq!(store.tail(), forward.last().copied());
    if let Some(head) = store.head() {
        assert_eq!(store.prev(head), None);
    }
    if let Some(tail) = store.tail() {
        assert_eq!(store.next(tail), None);
    }
}

proptest! {
    #[test]
    fn prop_store_stays_bidirectionally_consistent(ops in prop::collection::vec(op(), 0..60)) {
        let mut store = RecordStore::new();

        for op in ops {
            match op {
                Op::Add { title, artist, path } => {
                    let path = format!("/{path}.mp3");
                    let before = store.len();
                    let existed = store.find_by_path(Path::new(&path)).is_some();
                    let result = store.append(&title, &artist, Path::new(&path), Mood::Happy);
                    prop_assert_eq!(result.is_err(), existed);
                    prop_assert_eq!(store.len(), if existed { before } else { before + 1 });
                }
                Op::Delete(n) => {
                    let victim = store.iter().nth(n).map(|(id, _)| id);
                    if let Some(id) = victim {
                        store.delete(id).unwrap();
                        prop_assert!(!store.contains(id));
                        let index = SearchIndex::build(&store);
                        prop_assert!(!index.in_order().contains(&id));
                    }
                }
                Op::Sort(key) => {
                    sort(&mut store, key);
                }
            }
            assert_bidirectional(&store);
        }
    }

    #[test]
    fn prop_sort_is_a_stable_permutation(
        rows in prop::collection::vec(("[a-dA-D]{0,2}", "[a-cA-C]{0,2}"), 0..40),
        by_artist in any::<bool>(),
    ) {
        let key = if by_artist { SortKey::Artist } else { SortKey::Title };
        let mut store = RecordStore::new();
        for (i, (title, artist)) in rows.iter().enumerate() {
            store
                .append(title, artist, Path::new(&format!("/{i}.mp3")), Mood::Chill)
                .unwrap();
        }
        let before: Vec<TrackId> = store.iter().map(|(id, _)| id).collect();

        sort(&mut store, key);
        assert_bidirectional(&store);

        let sort_key = |id: TrackId| {
            let track = store.get(id).unwrap();
            match key {
                SortKey::Title => track.title.to_lowercase(),
                SortKey::Artist => track.artist.to_lowercase(),
            }
        };

        let after: Vec<TrackId> = store.iter().map(|(id, _)| id).collect();
        let mut expected = before.clone();
        expected.sort_by_key(|id| sort_key(*id));
        // Vec::sort_by_key is stable, so equal keys keep their original order
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn prop_index_in_order_is_sorted(titles in prop::collection::vec("[a-eA-E ]{0,4}", 0..40)) {
        let mut store = RecordStore::new();
        for (i, title) in titles.iter().enumerate() {
            store
                .append(title, "x", Path::new(&format!("/{i}.mp3")), Mood::Sad)
                .unwrap();
        }
        let index = SearchIndex::build(&store);
        let keys: Vec<String> = index
            .in_order()
            .into_iter()
            .map(|id| store.get(id).unwrap().title.to_lowercase())
            .collect();

        prop_assert_eq!(keys.len(), titles.len());
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}
