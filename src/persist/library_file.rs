use crate::library::RecordStore;
use crate::model::{Mood, Track};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const FIELD_SEPARATOR: char = '|';

/// Parse one library line
///
/// Returns `None` for lines with fewer than four fields. The favorite flag is
/// only read from a line with exactly five fields, where `1` means favorite.
/// Lines with more fields keep their first four and are never favorite.
pub fn parse_line(line: &str) -> Option<Track> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < 4 {
        return None;
    }

    Some(Track {
        title: fields[0].to_string(),
        artist: fields[1].to_string(),
        file_path: PathBuf::from(fields[2]),
        mood: Mood::from_name(fields[3]),
        favorite: fields.len() == 5 && fields[4] == "1",
    })
}

/// Whether `text` can be written as a field without breaking the line format
pub fn is_storable(text: &str) -> bool {
    !text.contains([FIELD_SEPARATOR, '\n', '\r'])
}

/// Render a track as one library line (without the newline)
pub fn format_line(track: &Track) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        track.title,
        track.artist,
        track.file_path.display(),
        track.mood,
        if track.favorite { "1" } else { "0" }
    )
}

/// Load a library file into a fresh store, in file order
///
/// A missing file is an empty library. Malformed lines are skipped, including
/// lines that are not valid UTF-8, and so is any line whose path is already
/// loaded.
pub fn load_library(path: &Path) -> Result<RecordStore> {
    let mut store = RecordStore::new();

    if !path.exists() {
        log::info!("No library file at {:?}, starting empty", path);
        return Ok(store);
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open library file: {:?}", path))?;

    let mut skipped = 0usize;
    for (line_no, bytes) in BufReader::new(file).split(b'\n').enumerate() {
        let mut bytes =
            bytes.with_context(|| format!("Failed to read line {} of {:?}", line_no + 1, path))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let Ok(line) = String::from_utf8(bytes) else {
            log::debug!("Line {} of {:?} is not valid UTF-8", line_no + 1, path);
            skipped += 1;
            continue;
        };
        let Some(track) = parse_line(&line) else {
            skipped += 1;
            continue;
        };

        if let Err(e) = store.push(track) {
            log::warn!("Skipping line {} of {:?}: {}", line_no + 1, path, e);
            skipped += 1;
        }
    }

    log::info!("Loaded {} tracks from {:?}", store.len(), path);
    if skipped > 0 {
        log::debug!("Skipped {} unusable lines", skipped);
    }
    Ok(store)
}

/// Rewrite the library file with every track in current order
pub fn save_library(path: &Path, store: &RecordStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create library file: {:?}", path))?;
    let mut out = BufWriter::new(file);

    for (_, track) in store.iter() {
        writeln!(out, "{}", format_line(track))
            .with_context(|| format!("Failed to write library file: {:?}", path))?;
    }
    out.flush()
        .with_context(|| format!("Failed to flush library file: {:?}", path))?;

    log::debug!("Saved {} tracks to {:?}", store.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_four_fields_defaults_to_not_favorite() {
        let track = parse_line("Song A|Art1|/a.mp3|Happy").unwrap();
        assert_eq!(track.title, "Song A");
        assert_eq!(track.artist, "Art1");
        assert_eq!(track.file_path, PathBuf::from("/a.mp3"));
        assert_eq!(track.mood, Mood::Happy);
        assert!(!track.favorite);
    }

    #[test]
    fn test_parse_favorite_flag() {
        assert!(parse_line("t|a|/p.mp3|Sad|1").unwrap().favorite);
        assert!(!parse_line("t|a|/p.mp3|Sad|0").unwrap().favorite);
    }

    #[test]
    fn test_favorite_flag_needs_exactly_five_fields() {
        let track = parse_line("t|a|/p.mp3|Sad|1|extra").unwrap();
        assert_eq!(track.mood, Mood::Sad);
        assert!(!track.favorite);
    }

    #[test]
    fn test_storable_fields() {
        assert!(is_storable("Song A"));
        assert!(!is_storable("a|b.mp3"));
        assert!(!is_storable("two\nlines"));
        assert!(!is_storable("cr\r"));
    }

    #[test]
    fn test_short_lines_are_rejected() {
        assert!(parse_line("").is_none());
        assert!(parse_line("only|three|fields").is_none());
    }

    #[test]
    fn test_format_line_always_writes_flag() {
        let mut track = Track::new("Song B", "Art2", "/b.mp3", Mood::Sad);
        assert_eq!(format_line(&track), "Song B|Art2|/b.mp3|Sad|0");
        track.favorite = true;
        assert_eq!(format_line(&track), "Song B|Art2|/b.mp3|Sad|1");
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = load_library(&dir.path().join("library.txt")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_and_duplicate_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(
            &path,
            "Song A|Art1|/a.mp3|Happy\n\
             broken line\n\
             Song B|Art2|/b.mp3|Sad|1\r\n\
             Again|Art1|/a.mp3|Chill|0\n",
        )
        .unwrap();

        let store = load_library(&path).unwrap();
        let tracks: Vec<&Track> = store.iter().map(|(_, t)| t).collect();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Song A");
        assert_eq!(tracks[1].title, "Song B");
        assert!(tracks[1].favorite);
    }

    #[test]
    fn test_load_skips_non_utf8_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(
            &path,
            b"Song A|Art1|/a.mp3|Happy\nBad\xff|x|/x.mp3|Sad\nSong B|Art2|/b.mp3|Sad\n",
        )
        .unwrap();

        let store = load_library(&path).unwrap();
        let titles: Vec<&str> = store.iter().map(|(_, t)| t.title.as_str()).collect();
        assert_eq!(titles, ["Song A", "Song B"]);
    }

    #[test]
    fn test_save_then_load_preserves_order_and_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("library.txt");

        let mut store = RecordStore::new();
        store
            .append("Zed", "Z", Path::new("/z.mp3"), Mood::Workout)
            .unwrap();
        let fav = store
            .append("Alpha", "A", Path::new("/a.mp3"), Mood::Other("Focus".into()))
            .unwrap();
        store.get_mut(fav).unwrap().favorite = true;

        save_library(&path, &store).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Zed|Z|/z.mp3|Workout|0\nAlpha|A|/a.mp3|Focus|1\n"
        );

        let loaded = load_library(&path).unwrap();
        let tracks: Vec<Track> = loaded.iter().map(|(_, t)| t.clone()).collect();
        let original: Vec<Track> = store.iter().map(|(_, t)| t.clone()).collect();
        assert_eq!(tracks, original);
    }
}
