//! Display-side types: browsing filter, table rows and the table collaborator

use crate::model::{Mood, Track};
use std::convert::Infallible;
use std::str::FromStr;

/// Which part of the library the table shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    Mood(Mood),
    Favorites,
}

impl ViewFilter {
    pub fn matches(&self, track: &Track) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::Mood(mood) => &track.mood == mood,
            ViewFilter::Favorites => track.favorite,
        }
    }
}

impl FromStr for ViewFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" | "All" | "All Songs" => ViewFilter::All,
            "favorites" | "Favorites" | "❤ Favorites" => ViewFilter::Favorites,
            mood => ViewFilter::Mood(Mood::from_name(mood)),
        })
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub title: String,
    pub artist: String,
    pub mood: Mood,
}

impl From<&Track> for Row {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            mood: track.mood.clone(),
        }
    }
}

/// Table or list widget that shows the library
///
/// The core only pushes rows and highlight requests; it never reads display
/// state back.
pub trait DisplayTable {
    fn clear(&mut self);

    fn append_row(&mut self, row: &Row);

    fn highlight(&mut self, row: usize);

    /// Called after the rows and highlight of one render are pushed
    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parse() {
        assert_eq!("All Songs".parse::<ViewFilter>().unwrap(), ViewFilter::All);
        assert_eq!("favorites".parse::<ViewFilter>().unwrap(), ViewFilter::Favorites);
        assert_eq!(
            "Chill".parse::<ViewFilter>().unwrap(),
            ViewFilter::Mood(Mood::Chill)
        );
    }

    #[test]
    fn test_filter_matches() {
        let mut track = Track::new("t", "a", "/t.mp3", Mood::Sad);
        assert!(ViewFilter::All.matches(&track));
        assert!(ViewFilter::Mood(Mood::Sad).matches(&track));
        assert!(!ViewFilter::Mood(Mood::Happy).matches(&track));
        assert!(!ViewFilter::Favorites.matches(&track));
        track.favorite = true;
        assert!(ViewFilter::Favorites.matches(&track));
    }
}
