//! Media player collaborator interface

use anyhow::Result;
use std::path::Path;

/// Audio backend driven by the playback session
///
/// Decoding and output happen behind this trait. Implementations report
/// progress back through [`MediaEvent`]s delivered on the same event loop.
pub trait MediaPlayer {
    /// Load a file as the current source
    fn load(&mut self, path: &Path) -> Result<()>;

    fn play(&mut self);

    fn pause(&mut self);

    fn stop(&mut self);
}

/// Notifications emitted by a [`MediaPlayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback position in milliseconds
    Position(u64),

    /// Length of the loaded media in milliseconds
    Duration(u64),

    /// The loaded media finished playing
    EndOfMedia,
}
