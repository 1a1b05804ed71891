//! Library error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by library operations
///
/// None of these are fatal. Each one is reported at the boundary of the user
/// action that caused it and leaves the previous state intact.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("This song is already in your library: {}", path.display())]
    Duplicate { path: PathBuf },

    #[error("The {field} contains '|' or a line break and cannot be saved")]
    Unstorable { field: &'static str },

    #[error("No more songs in history stack.")]
    EmptyHistory,

    #[error("Track is no longer in the library")]
    NotFound,

    #[error("No track is currently selected")]
    NoCurrentTrack,

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Failed to save library: {0:#}")]
    Persist(#[source] anyhow::Error),
}

impl LibraryError {
    /// Whether this should be shown as a notice rather than a warning
    pub fn is_informational(&self) -> bool {
        matches!(self, LibraryError::EmptyHistory | LibraryError::NoCurrentTrack)
    }
}
