//! Application state and command handling
//!
//! [`Jukebox`] is the single application-state value: it owns the library
//! core, the playback session and the view settings, and runs each
//! [`Command`] to completion.

mod command;
mod config;
mod jukebox;
mod prompt;
mod view;

pub use command::Command;
pub use config::AppConfig;
pub use jukebox::Jukebox;
pub use prompt::Prompt;
pub use view::{DisplayTable, Row, ViewFilter};
