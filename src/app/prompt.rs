//! Dialog collaborator

use crate::model::Mood;
use std::path::PathBuf;

/// Synchronous dialogs used by add and delete
///
/// Every method returns `None` (or `false`) when the user cancels.
pub trait Prompt {
    /// Pick an audio file to add
    fn choose_file(&mut self) -> Option<PathBuf>;

    /// Pick one of `moods`
    fn choose_mood(&mut self, moods: &[Mood]) -> Option<Mood>;

    /// Free-text artist name, pre-filled with `default`
    fn ask_artist(&mut self, default: &str) -> Option<String>;

    /// Yes/no question
    fn confirm(&mut self, question: &str) -> bool;
}
