//! Track data model
//!
//! Plain record types shared by the library core, persistence and the
//! application layer.

mod track;

pub use track::{Mood, Track};
