//! Typed UI and player events

use super::view::ViewFilter;
use crate::library::SortKey;
use crate::playback::MediaEvent;

/// Everything the front end can ask the jukebox to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the add dialogs and append the chosen file
    AddTrack,
    /// Confirm, then delete the current track
    DeleteCurrent,
    /// Play the track shown at this table row
    SelectRow(usize),
    /// Play the first indexed title starting with this text
    Jump(String),
    TogglePlay,
    Next,
    Previous,
    /// Replay the most recent history entry
    Back,
    ClearHistory,
    ToggleFavorite,
    Sort(SortKey),
    Filter(ViewFilter),
    /// Substring filter on titles; empty clears it
    Search(String),
    Media(MediaEvent),
}
