//! In-memory library core
//!
//! The record store owns every track. The search index, history and playback
//! session only hold [`TrackId`] handles into it.

mod history;
mod index;
mod sort;
mod store;

pub use history::History;
pub use index::SearchIndex;
pub use sort::{sort, SortKey};
pub use store::{Iter, RecordStore, TrackId};
