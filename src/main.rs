use anyhow::Result;
use clap::Parser;
use moodbox::model::Mood;
use moodbox::playback::NullPlayer;
use moodbox::terminal::{parse_input, read_command, Dialogs, Input, TextTable, HELP};
use moodbox::{AppConfig, Command, Jukebox, LibraryError};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodbox")]
#[command(about = "Mood-tagged music library with playback history", long_about = None)]
struct Args {
    /// Library file (one `title|artist|path|mood|favorite` line per track)
    #[arg(short = 'l', long, default_value = "library.txt")]
    library: String,

    /// Mood offered when adding tracks (repeat to replace the default set)
    #[arg(long = "mood")]
    moods: Vec<String>,

    /// Keep changes in memory only
    #[arg(long)]
    no_autosave: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let library_path = PathBuf::from(shellexpand::tilde(&args.library).as_ref());
    let moods = args.moods.iter().map(|m| Mood::from_name(m)).collect();
    let config = AppConfig::new(library_path)
        .with_moods(moods)
        .with_autosave(!args.no_autosave);

    log::info!("Opening library {:?}", config.library_path);
    let mut jukebox = Jukebox::open(config, NullPlayer::new())?;
    log::info!("Library loaded: {} tracks", jukebox.store().len());

    let mut dialogs = Dialogs::new();
    let mut table = TextTable::new(io::stdout());
    jukebox.render(&mut table);

    while let Some(line) = read_command("> ")? {
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Empty) => {}
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::List) => jukebox.render(&mut table),
            Ok(Input::History) => {
                let titles = jukebox.history_titles();
                if titles.is_empty() {
                    println!("History is empty.");
                }
                for title in titles {
                    println!("  {title}");
                }
            }
            Ok(Input::Command(command)) => {
                let redraw = changes_table(&command);
                match jukebox.dispatch(command, &mut dialogs) {
                    Ok(()) if redraw => jukebox.render(&mut table),
                    Ok(()) => {}
                    Err(e) => report(&e),
                }
            }
            Err(message) => log::warn!("{}", message),
        }
    }

    log::info!("Bye");
    Ok(())
}

fn changes_table(command: &Command) -> bool {
    matches!(
        command,
        Command::AddTrack
            | Command::DeleteCurrent
            | Command::Sort(_)
            | Command::Filter(_)
            | Command::Search(_)
    )
}

fn report(error: &LibraryError) {
    match error {
        LibraryError::NotFound => log::debug!("{}", error),
        e if e.is_informational() => log::info!("{}", e),
        e => log::warn!("{}", e),
    }
}
