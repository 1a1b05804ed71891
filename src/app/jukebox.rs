//! The application-state struct

use super::command::Command;
use super::config::AppConfig;
use super::prompt::Prompt;
use super::view::{DisplayTable, Row, ViewFilter};
use crate::error::LibraryError;
use crate::library::{self, History, RecordStore, SearchIndex, SortKey, TrackId};
use crate::model::{Mood, Track};
use crate::persist;
use crate::playback::{MediaEvent, MediaPlayer, PlaybackSession, PlaybackState};
use anyhow::Result;
use std::path::Path;

/// Library, index, history and playback session behind one owner
pub struct Jukebox<P: MediaPlayer> {
    config: AppConfig,
    store: RecordStore,
    index: SearchIndex,
    history: History,
    session: PlaybackSession<P>,
    filter: ViewFilter,
    search_text: String,
}

impl<P: MediaPlayer> Jukebox<P> {
    /// Load the configured library file (when autosave is on) and build the index
    pub fn open(config: AppConfig, player: P) -> Result<Self> {
        let store = if config.autosave {
            persist::load_library(&config.library_path)?
        } else {
            RecordStore::new()
        };
        Ok(Self::with_store(config, store, player))
    }

    /// Wrap an already populated store
    pub fn with_store(config: AppConfig, store: RecordStore, player: P) -> Self {
        let index = SearchIndex::build(&store);
        Self {
            config,
            store,
            index,
            history: History::new(),
            session: PlaybackSession::new(player),
            filter: ViewFilter::All,
            search_text: String::new(),
        }
    }

    /// Run one command to completion
    pub fn dispatch(&mut self, command: Command, prompt: &mut impl Prompt) -> Result<(), LibraryError> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::AddTrack => self.add_track(prompt).map(|_| ()),
            Command::DeleteCurrent => self.delete_current(prompt).map(|_| ()),
            Command::SelectRow(row) => self.select_row(row).map(|_| ()),
            Command::Jump(query) => self.jump_to(&query).map(|_| ()),
            Command::TogglePlay => self.toggle_play(),
            Command::Next => self.next().map(|_| ()),
            Command::Previous => self.previous().map(|_| ()),
            Command::Back => self.back().map(|_| ()),
            Command::ClearHistory => {
                self.clear_history();
                Ok(())
            }
            Command::ToggleFavorite => self.toggle_favorite().map(|_| ()),
            Command::Sort(key) => {
                self.sort(key);
                Ok(())
            }
            Command::Filter(filter) => {
                self.set_filter(filter);
                Ok(())
            }
            Command::Search(text) => {
                self.set_search_text(&text);
                Ok(())
            }
            Command::Media(event) => self.on_media_event(event),
        }
    }

    /// Append a track, rebuild the index and persist
    ///
    /// Fields that would break the library file line are rejected before
    /// anything is linked. If persisting fails the append is rolled back.
    pub fn add(
        &mut self,
        title: &str,
        artist: &str,
        path: &Path,
        mood: Mood,
    ) -> Result<TrackId, LibraryError> {
        let path_text = path.to_string_lossy();
        for (field, text) in [
            ("title", title),
            ("artist", artist),
            ("file path", path_text.as_ref()),
            ("mood", mood.name()),
        ] {
            if !persist::is_storable(text) {
                return Err(LibraryError::Unstorable { field });
            }
        }

        let id = self.store.append(title, artist, path, mood)?;
        self.index.rebuild(&self.store);

        if let Err(e) = self.persist() {
            self.store.delete(id)?;
            self.index.rebuild(&self.store);
            return Err(e);
        }

        log::info!("Added '{}' ({:?})", title, path);
        Ok(id)
    }

    /// Add flow driven by dialogs
    ///
    /// The duplicate check runs right after the file is chosen, before the
    /// mood and artist dialogs. Cancelling any dialog adds nothing.
    pub fn add_track(&mut self, prompt: &mut impl Prompt) -> Result<Option<TrackId>, LibraryError> {
        let Some(path) = prompt.choose_file() else {
            return Ok(None);
        };

        if self.store.find_by_path(&path).is_some() {
            return Err(LibraryError::Duplicate { path });
        }

        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let Some(mood) = prompt.choose_mood(&self.config.moods) else {
            return Ok(None);
        };
        let Some(artist) = prompt.ask_artist(&self.config.default_artist) else {
            return Ok(None);
        };

        self.add(&title, &artist, &path, mood).map(Some)
    }

    /// Remove a track everywhere it is referenced
    ///
    /// Order: unlink from the store, release it from the session, drop the
    /// history, rebuild the index, then persist.
    pub fn delete(&mut self, id: TrackId) -> Result<Track, LibraryError> {
        let removed = self.store.delete(id)?;

        if self.session.release(id) {
            log::info!("Stopped playback of deleted track '{}'", removed.title);
        }
        self.history.invalidate();
        self.index.rebuild(&self.store);
        self.persist_or_warn();

        log::info!("Deleted '{}' ({:?})", removed.title, removed.file_path);
        Ok(removed)
    }

    /// Delete the current track after confirmation
    pub fn delete_current(&mut self, prompt: &mut impl Prompt) -> Result<Option<Track>, LibraryError> {
        let (id, track) = self.current_track().ok_or(LibraryError::NoCurrentTrack)?;
        let question = format!("Delete '{}'?", track.title);

        if !prompt.confirm(&question) {
            return Ok(None);
        }
        self.delete(id).map(Some)
    }

    /// Play `id`, recording the previous track in history
    pub fn select(&mut self, id: TrackId) -> Result<(), LibraryError> {
        self.session.select(&self.store, &mut self.history, id, true)
    }

    /// Play the first track (library order) titled like the clicked row
    pub fn select_row(&mut self, row: usize) -> Result<TrackId, LibraryError> {
        let title = self
            .visible()
            .get(row)
            .and_then(|id| self.store.get(*id))
            .map(|track| track.title.clone())
            .ok_or(LibraryError::NotFound)?;

        let id = self.store.find_by_title(&title).ok_or(LibraryError::NotFound)?;
        self.select(id)?;
        Ok(id)
    }

    /// Play the track the search index finds for `query`
    pub fn jump_to(&mut self, query: &str) -> Result<TrackId, LibraryError> {
        let id = self.find_prefix(query).ok_or(LibraryError::NotFound)?;
        self.select(id)?;
        Ok(id)
    }

    /// Title prefix lookup through the search index
    pub fn find_prefix(&self, query: &str) -> Option<TrackId> {
        self.index.find_prefix(query)
    }

    pub fn toggle_play(&mut self) -> Result<(), LibraryError> {
        self.session.toggle_play(&self.store, &mut self.history)
    }

    pub fn next(&mut self) -> Result<Option<TrackId>, LibraryError> {
        self.session.advance(&self.store, &mut self.history)
    }

    pub fn previous(&mut self) -> Result<Option<TrackId>, LibraryError> {
        self.session.retreat(&self.store, &mut self.history)
    }

    /// Go back to the most recently played track without recording history
    ///
    /// The entry is only popped once the player accepted it.
    pub fn back(&mut self) -> Result<TrackId, LibraryError> {
        let id = self.history.last().ok_or(LibraryError::EmptyHistory)?;
        self.session.select(&self.store, &mut self.history, id, false)?;
        self.history.pop_last();
        Ok(id)
    }

    pub fn clear_history(&mut self) {
        self.history.invalidate();
    }

    /// Flip the favorite flag of the current track and persist
    pub fn toggle_favorite(&mut self) -> Result<bool, LibraryError> {
        let id = self.session.current().ok_or(LibraryError::NoCurrentTrack)?;
        let track = self.store.get_mut(id).ok_or(LibraryError::NotFound)?;
        track.favorite = !track.favorite;
        let favorite = track.favorite;

        self.persist_or_warn();
        Ok(favorite)
    }

    /// Reorder the library in place and persist the new order
    pub fn sort(&mut self, key: SortKey) {
        library::sort(&mut self.store, key);
        self.persist_or_warn();
    }

    /// Handle a player notification; end of media moves to the next track
    pub fn on_media_event(&mut self, event: MediaEvent) -> Result<(), LibraryError> {
        self.session.on_media_event(event);
        if event == MediaEvent::EndOfMedia {
            self.next()?;
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_lowercase();
    }

    /// Tracks shown in the table, in library order
    ///
    /// The browsing filter applies first; a non-empty search text further
    /// keeps only titles containing it (case-insensitive).
    pub fn visible(&self) -> Vec<TrackId> {
        self.store
            .iter()
            .filter(|(_, track)| self.filter.matches(track))
            .filter(|(_, track)| {
                self.search_text.is_empty()
                    || track.title.to_lowercase().contains(&self.search_text)
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.visible()
            .into_iter()
            .filter_map(|id| self.store.get(id))
            .map(Row::from)
            .collect()
    }

    /// Push the current view into a table and highlight the playing title
    pub fn render(&self, table: &mut impl DisplayTable) {
        let rows = self.rows();
        table.clear();
        for row in &rows {
            table.append_row(row);
        }

        if let Some((_, current)) = self.current_track() {
            if let Some(pos) = rows.iter().position(|row| row.title == current.title) {
                table.highlight(pos);
            }
        }
        table.finish();
    }

    /// History titles, most recent first
    pub fn history_titles(&self) -> Vec<String> {
        self.history
            .iter()
            .filter_map(|id| self.store.get(id))
            .map(|track| track.title.clone())
            .collect()
    }

    pub fn current_track(&self) -> Option<(TrackId, &Track)> {
        let id = self.session.current()?;
        self.store.get(id).map(|track| (id, track))
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn session(&self) -> &PlaybackSession<P> {
        &self.session
    }

    pub fn player_mut(&mut self) -> &mut P {
        self.session.player_mut()
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn persist(&self) -> Result<(), LibraryError> {
        if !self.config.autosave {
            return Ok(());
        }
        persist::save_library(&self.config.library_path, &self.store).map_err(LibraryError::Persist)
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            log::warn!("{}", e);
        }
    }
}
