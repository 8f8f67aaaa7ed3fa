#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Metronome Core
//!
//! Mechanical-metronome core logic library for embedded systems.
//! Tick-tock beep sequencing, button-driven tempo selection with saturation,
//! and boundary LED feedback over a narrow HAL seam.

pub mod beeper;
pub mod hal;
pub mod selector;
pub mod sequencer;
pub mod timings;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use beeper::*;
pub use hal::{Duration, Instant, *};
pub use selector::*;
pub use sequencer::*;
pub use timings::*;
pub use types::*;

/// Metronome library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration matching the reference hardware
pub fn default_config() -> MetronomeConfig {
    MetronomeConfig::default()
}
