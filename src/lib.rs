//! Moodbox - personal music library manager
//!
//! This library keeps an ordered track library with mood tags and favorites,
//! a title search index, stable title/artist sorting and a recently-played
//! history. Audio output and the display are external collaborators reached
//! through the [`playback::MediaPlayer`] and [`app::DisplayTable`] traits.

pub mod app;
pub mod error;
pub mod library;
pub mod model;
pub mod persist;
pub mod playback;
pub mod terminal;

pub use app::{AppConfig, Command, Jukebox};
pub use error::LibraryError;
