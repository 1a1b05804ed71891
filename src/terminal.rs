//! Terminal front end
//!
//! Turns typed lines into [`Command`]s, runs the add/delete dialogs with
//! `dialoguer` and draws the library table with `comfy-table`.

use crate::app::{Command, DisplayTable, Prompt, Row, ViewFilter};
use crate::library::SortKey;
use crate::model::Mood;
use crate::playback::MediaEvent;
use comfy_table::{Cell, Table};
use dialoguer::{Confirm, Input as DialogInput, Select};
use std::io::{self, Write};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  add                 add an audio file (asks for path, mood, artist)
  delete              delete the current track (asks for confirmation)
  play                play / pause
  next | prev         move through the library
  back                replay the previous track from history
  history             show recently played tracks
  clear-history       forget recently played tracks
  fav                 toggle favorite on the current track
  sort title|artist   reorder the library
  filter <name>       all, favorites, or a mood name
  search [text]       filter titles containing text (empty clears)
  jump <prefix>       play a track whose title starts with prefix
  select <row>        play the track at a table row (1-based)
  list                show the table
  position <ms> | duration <ms> | end
                      simulate player notifications
  quit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    List,
    History,
    Help,
    Quit,
    Empty,
}

/// Parse one line of user input
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => return Ok(Input::Empty),
        "list" | "ls" => return Ok(Input::List),
        "history" => return Ok(Input::History),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "add" => Command::AddTrack,
        "delete" | "rm" => Command::DeleteCurrent,
        "play" | "pause" => Command::TogglePlay,
        "next" => Command::Next,
        "prev" => Command::Previous,
        "back" => Command::Back,
        "clear-history" => Command::ClearHistory,
        "fav" => Command::ToggleFavorite,
        "sort" => Command::Sort(rest.parse::<SortKey>()?),
        "filter" => Command::Filter(rest.parse::<ViewFilter>().unwrap_or_default()),
        "search" => Command::Search(rest.to_string()),
        "jump" => {
            if rest.is_empty() {
                return Err("jump needs a title prefix".to_string());
            }
            Command::Jump(rest.to_string())
        }
        "select" => {
            let row: usize = rest
                .parse()
                .map_err(|_| format!("'{rest}' is not a row number"))?;
            if row == 0 {
                return Err("rows are numbered from 1".to_string());
            }
            Command::SelectRow(row - 1)
        }
        "position" => Command::Media(MediaEvent::Position(parse_ms(rest)?)),
        "duration" => Command::Media(MediaEvent::Duration(parse_ms(rest)?)),
        "end" => Command::Media(MediaEvent::EndOfMedia),
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };

    Ok(Input::Command(command))
}

fn parse_ms(text: &str) -> Result<u64, String> {
    text.parse()
        .map_err(|_| format!("'{text}' is not a number of milliseconds"))
}

/// Print `label` and read one command line from stdin, `None` at end of input
///
/// Stdin is only locked for the read so the dialogs can use it in between.
pub fn read_command(label: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Add/delete dialogs on the controlling terminal
#[derive(Debug, Default)]
pub struct Dialogs;

impl Dialogs {
    pub fn new() -> Self {
        Self
    }
}

/// Log a failed dialog and treat it as cancelled
fn answered<T>(result: dialoguer::Result<T>) -> Option<T> {
    result
        .map_err(|e| log::warn!("Dialog failed: {}", e))
        .ok()
}

impl Prompt for Dialogs {
    fn choose_file(&mut self) -> Option<PathBuf> {
        let answer: String = answered(
            DialogInput::new()
                .with_prompt("Audio file")
                .allow_empty(true)
                .interact_text(),
        )?;
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        Some(PathBuf::from(shellexpand::tilde(answer).as_ref()))
    }

    fn choose_mood(&mut self, moods: &[Mood]) -> Option<Mood> {
        if moods.is_empty() {
            return None;
        }
        let choice = answered(
            Select::new()
                .with_prompt("Mood")
                .items(moods)
                .default(0)
                .interact_opt(),
        )??;
        moods.get(choice).cloned()
    }

    fn ask_artist(&mut self, default: &str) -> Option<String> {
        let answer: String = answered(
            DialogInput::new()
                .with_prompt("Artist name")
                .default(default.to_string())
                .interact_text(),
        )?;
        let answer = answer.trim();
        if answer.is_empty() {
            Some(default.to_string())
        } else {
            Some(answer.to_string())
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        answered(
            Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact_opt(),
        )
        .flatten()
        .unwrap_or(false)
    }
}

/// Marker shown next to the playing row
const NOW_PLAYING: &str = "▶";

/// Build the library table; `highlighted` is a 0-based row
pub fn library_table(rows: &[Row], highlighted: Option<usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "#", "Song Title", "Artist", "Mood"]);

    for (i, row) in rows.iter().enumerate() {
        let marker = if highlighted == Some(i) { NOW_PLAYING } else { "" };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(i + 1),
            Cell::new(&row.title),
            Cell::new(&row.artist),
            Cell::new(&row.mood),
        ]);
    }
    table
}

/// Library table printed to a writer once a render finishes
pub struct TextTable<W: Write> {
    output: W,
    rows: Vec<Row>,
    highlighted: Option<usize>,
}

impl<W: Write> TextTable<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            rows: Vec::new(),
            highlighted: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> DisplayTable for TextTable<W> {
    fn clear(&mut self) {
        self.rows.clear();
        self.highlighted = None;
    }

    fn append_row(&mut self, row: &Row) {
        self.rows.push(row.clone());
    }

    fn highlight(&mut self, row: usize) {
        self.highlighted = Some(row);
    }

    fn finish(&mut self) {
        let table = library_table(&self.rows, self.highlighted);
        if let Err(e) = writeln!(self.output, "{table}") {
            log::warn!("Failed to write table: {}", e);
        }
    }
}
