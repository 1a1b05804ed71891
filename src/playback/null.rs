//! Player that only logs what it is asked to do
//!
//! Used by the terminal front end, which has no audio output of its own.

use super::traits::MediaPlayer;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Silent [`MediaPlayer`]
#[derive(Debug, Default)]
pub struct NullPlayer {
    source: Option<PathBuf>,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the most recently loaded source
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl MediaPlayer for NullPlayer {
    fn load(&mut self, path: &Path) -> Result<()> {
        log::debug!("Loading source {:?}", path);
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) {
        log::info!("▶ {:?}", self.source);
    }

    fn pause(&mut self) {
        log::info!("⏸ {:?}", self.source);
    }

    fn stop(&mut self) {
        log::info!("⏹ {:?}", self.source);
        self.source = None;
    }
}
