use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A single library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title (the file name when added through the dialog)
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Path to the audio file, the unique key of the library
    pub file_path: PathBuf,

    /// Mood category used for filtered browsing
    pub mood: Mood,

    /// Whether the track is marked as a favorite
    pub favorite: bool,
}

impl Track {
    /// Create a new, non-favorite track
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_path: impl Into<PathBuf>,
        mood: Mood,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            file_path: file_path.into(),
            mood,
            favorite: false,
        }
    }
}

/// Mood tag attached to every track
///
/// The four built-in moods are what the add dialog offers by default. Any
/// other text read from a library file is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Chill,
    Workout,
    Sad,
    Other(String),
}

impl Mood {
    /// Moods offered when adding a track
    pub const BUILT_IN: [Mood; 4] = [Mood::Happy, Mood::Chill, Mood::Workout, Mood::Sad];

    /// Map a stored name to a mood, keeping unknown names as `Other`
    pub fn from_name(name: &str) -> Self {
        match name {
            "Happy" => Mood::Happy,
            "Chill" => Mood::Chill,
            "Workout" => Mood::Workout,
            "Sad" => Mood::Sad,
            other => Mood::Other(other.to_string()),
        }
    }

    /// Human-readable name, also the persisted form
    pub fn name(&self) -> &str {
        match self {
            Mood::Happy => "Happy",
            Mood::Chill => "Chill",
            Mood::Workout => "Workout",
            Mood::Sad => "Sad",
            Mood::Other(name) => name,
        }
    }
}

impl FromStr for Mood {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mood::from_name(s))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
