//! Application configuration

use crate::model::Mood;
use std::path::PathBuf;

/// Settings fixed for the lifetime of a [`Jukebox`](super::Jukebox)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Library file, rewritten after every change when `autosave` is on
    pub library_path: PathBuf,

    /// Moods offered when adding a track
    pub moods: Vec<Mood>,

    /// Persist after each mutation (off gives an in-memory library)
    pub autosave: bool,

    /// Pre-filled answer of the artist dialog
    pub default_artist: String,
}

impl AppConfig {
    /// Configuration backed by the given library file
    pub fn new(library_path: PathBuf) -> Self {
        Self {
            library_path,
            moods: Mood::BUILT_IN.to_vec(),
            autosave: true,
            default_artist: "Unknown Artist".to_string(),
        }
    }

    /// Configuration that never touches the disk
    pub fn in_memory() -> Self {
        Self::new(PathBuf::new()).with_autosave(false)
    }

    /// Replace the mood choices (ignored when empty)
    pub fn with_moods(mut self, moods: Vec<Mood>) -> Self {
        if !moods.is_empty() {
            self.moods = moods;
        }
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("library.txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.library_path, PathBuf::from("library.txt"));
        assert_eq!(config.moods, Mood::BUILT_IN.to_vec());
        assert!(config.autosave);
        assert_eq!(config.default_artist, "Unknown Artist");
    }

    #[test]
    fn test_empty_mood_list_keeps_defaults() {
        let config = AppConfig::default().with_moods(Vec::new());
        assert_eq!(config.moods.len(), 4);

        let config = AppConfig::default().with_moods(vec![Mood::Other("Focus".into())]);
        assert_eq!(config.moods, vec![Mood::Other("Focus".into())]);
    }

    #[test]
    fn test_in_memory_disables_autosave() {
        assert!(!AppConfig::in_memory().autosave);
    }
}
