//! Current-track state machine

use super::traits::{MediaEvent, MediaPlayer};
use crate::error::LibraryError;
use crate::library::{History, RecordStore, TrackId};

/// Transport state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Binds at most one track as current and drives the media player
///
/// The session never owns tracks. Whoever deletes from the store must call
/// [`PlaybackSession::release`] so the current handle never outlives its
/// track.
#[derive(Debug)]
pub struct PlaybackSession<P: MediaPlayer> {
    player: P,
    current: Option<TrackId>,
    state: PlaybackState,
    position_ms: u64,
    duration_ms: u64,
}

impl<P: MediaPlayer> PlaybackSession<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            current: None,
            state: PlaybackState::Stopped,
            position_ms: 0,
            duration_ms: 0,
        }
    }

    /// Make `id` current and start playing it
    ///
    /// With `record_history`, the previously current track (if different)
    /// is pushed onto `history` first. If the player rejects the file,
    /// nothing changes.
    pub fn select(
        &mut self,
        store: &RecordStore,
        history: &mut History,
        id: TrackId,
        record_history: bool,
    ) -> Result<(), LibraryError> {
        let track = store.get(id).ok_or(LibraryError::NotFound)?;

        self.player
            .load(&track.file_path)
            .map_err(|e| LibraryError::Playback(format!("{e:#}")))?;

        if record_history {
            history.record_play(self.current, id);
        }

        log::info!("Now playing: {} - {}", track.artist, track.title);
        self.current = Some(id);
        self.position_ms = 0;
        self.duration_ms = 0;
        self.player.play();
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Play/pause button behavior
    ///
    /// Pauses while playing. Otherwise resumes the current track, or starts
    /// the first track of the library when nothing is current.
    pub fn toggle_play(
        &mut self,
        store: &RecordStore,
        history: &mut History,
    ) -> Result<(), LibraryError> {
        if self.state == PlaybackState::Playing {
            self.pause();
            return Ok(());
        }

        match self.current {
            Some(_) => {
                self.resume();
                Ok(())
            }
            None => {
                let head = store.head().ok_or(LibraryError::NoCurrentTrack)?;
                self.select(store, history, head, true)
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.player.pause();
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.current.is_some() && self.state != PlaybackState::Playing {
            self.player.play();
            self.state = PlaybackState::Playing;
        }
    }

    /// Move to the next track in library order, if there is one
    pub fn advance(
        &mut self,
        store: &RecordStore,
        history: &mut History,
    ) -> Result<Option<TrackId>, LibraryError> {
        let next = self.current.and_then(|id| store.next(id));
        self.step_to(store, history, next)
    }

    /// Move to the previous track in library order, if there is one
    pub fn retreat(
        &mut self,
        store: &RecordStore,
        history: &mut History,
    ) -> Result<Option<TrackId>, LibraryError> {
        let prev = self.current.and_then(|id| store.prev(id));
        self.step_to(store, history, prev)
    }

    /// Forget `id` if it is current, stopping the player
    ///
    /// Returns whether the session was bound to it.
    pub fn release(&mut self, id: TrackId) -> bool {
        if self.current != Some(id) {
            return false;
        }
        self.player.stop();
        self.current = None;
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
        self.duration_ms = 0;
        true
    }

    /// Apply a player notification
    ///
    /// Position and duration updates only touch the session's counters.
    /// End of media marks the session stopped; the caller decides whether to
    /// advance.
    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Position(ms) => self.position_ms = ms,
            MediaEvent::Duration(ms) => self.duration_ms = ms,
            MediaEvent::EndOfMedia => {
                if self.current.is_some() {
                    self.state = PlaybackState::Stopped;
                }
            }
        }
    }

    pub fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    fn step_to(
        &mut self,
        store: &RecordStore,
        history: &mut History,
        target: Option<TrackId>,
    ) -> Result<Option<TrackId>, LibraryError> {
        match target {
            Some(id) => {
                self.select(store, history, id, true)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }
}
