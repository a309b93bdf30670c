//! Player module: the simulated playback state machine.
//!
//! There is no audio pipeline behind this player; it models what a
//! listener would see — current track, position, volume, playlist — and
//! reports plays to the backend.

mod state;

pub use state::*;
