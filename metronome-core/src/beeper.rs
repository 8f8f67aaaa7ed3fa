//! Square-wave beep emitter
//!
//! Open-loop tone generation: the speaker line is toggled high/low with a
//! busy-wait of one semiperiod at each level. No timer peripheral is used.

use crate::hal::{DelayTimer, OutputLine};

/// Calibration constant tying the busy-wait unit to real microseconds at
/// the nominal 1 MHz clock: semiperiod_us = SEMIPERIOD_DIVIDEND / note.
pub const SEMIPERIOD_DIVIDEND: u32 = 62_500;

/// Semiperiod in busy-wait microseconds for a note
///
/// Returns 0 for a note of 0 or a note above [`SEMIPERIOD_DIVIDEND`]; both
/// are contract violations callers must treat as "emit nothing".
pub const fn semiperiod_us(note: u32) -> u32 {
    if note == 0 {
        0
    } else {
        SEMIPERIOD_DIVIDEND / note
    }
}

/// Number of high/low toggle pairs for a note and scaled duration
///
/// The division truncates. The original firmware relied on the same
/// integer approximation, so the truncation is load-bearing for pitch/length
/// fidelity and must not be rounded.
pub const fn toggle_pairs(note: u32, duration: u32) -> u32 {
    let semiperiod = semiperiod_us(note);
    if semiperiod == 0 {
        0
    } else {
        // Saturate the scaling so an absurd duration degrades to a long
        // beep instead of wrapping
        duration.saturating_mul(100) / semiperiod
    }
}

/// Emit one beep on `line`
///
/// Holds the line high for one semiperiod and low for one semiperiod,
/// [`toggle_pairs`] times. The line is guaranteed low after completion and
/// is not touched at all when the note is out of contract (zero, or so high
/// the semiperiod truncates to zero).
pub fn beep<E, L, D>(line: &mut L, delay: &mut D, note: u32, duration: u32) -> Result<(), E>
where
    L: OutputLine<Error = E>,
    D: DelayTimer<Error = E>,
{
    let semiperiod = semiperiod_us(note);
    if semiperiod == 0 {
        // Contract violation; emitting would corrupt the timing arithmetic
        return Ok(());
    }

    let pairs = toggle_pairs(note, duration);
    for _ in 0..pairs {
        line.set_state(true)?;
        delay.delay_us(semiperiod)?;
        line.set_state(false)?;
        delay.delay_us(semiperiod)?;
    }
    Ok(())
}
