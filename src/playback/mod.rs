//! Playback coordination
//!
//! The session decides which track is current and drives an external
//! [`MediaPlayer`]. Audio decoding itself lives behind that trait.

mod null;
mod session;
mod traits;

pub use null::NullPlayer;
pub use session::{PlaybackSession, PlaybackState};
pub use traits::{MediaEvent, MediaPlayer};
