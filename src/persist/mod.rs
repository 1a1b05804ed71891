//! Library file persistence
//!
//! One track per line, fields separated by `|`:
//! `title|artist|filePath|mood|favorite` with `favorite` written as `1`/`0`.
//! The favorite field is optional on read.

mod library_file;

pub use library_file::{format_line, is_storable, load_library, parse_line, save_library};
