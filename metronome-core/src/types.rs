//! Core data types for the metronome

use crate::timings::MAX_TEMPO_INDEX;

/// Tempo button identification
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
pub enum ButtonSide {
    /// "Faster" button (steps the tempo index up)
    Faster,
    /// "Slower" button (steps the tempo index down)
    Slower,
}

impl ButtonSide {
    /// Returns the index delta this button requests
    pub const fn delta(&self) -> i8 {
        match self {
            ButtonSide::Faster => 1,
            ButtonSide::Slower => -1,
        }
    }

    /// Returns the opposite button side
    pub const fn opposite(&self) -> ButtonSide {
        match self {
            ButtonSide::Faster => ButtonSide::Slower,
            ButtonSide::Slower => ButtonSide::Faster,
        }
    }
}

/// Result of one tempo-selector service step
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TempoChange {
    /// Index stepped up by one
    Increased,
    /// Index stepped down by one
    Decreased,
    /// No mutation (no press latched, or press clamped at a table edge)
    Unchanged,
}

impl TempoChange {
    /// Returns true if the index was actually mutated
    pub const fn is_change(&self) -> bool {
        !matches!(self, TempoChange::Unchanged)
    }
}

/// Boundary-indicator LED blink convention
///
/// A quick flash (immediate re-assert) signals the index landed on a table
/// edge; a paused flash (calibrated wait before re-assert) signals any
/// mid-range transition. This is the only visible limit indication.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoundaryFeedback {
    /// Landed on index 0 or the top index: LED re-asserted immediately
    QuickFlash,
    /// Landed strictly inside the range: calibrated pause, then LED on
    PausedFlash,
}

impl BoundaryFeedback {
    /// Returns true if the re-assert is preceded by the calibrated pause
    pub const fn has_pause(&self) -> bool {
        matches!(self, BoundaryFeedback::PausedFlash)
    }
}

/// Outcome of servicing one button-edge event
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SelectorOutcome {
    /// Direction the index moved, if it moved
    pub change: TempoChange,
    /// Index value after the step
    pub index: usize,
    /// True if either button had a pending edge latched
    pub latched: bool,
    /// LED blink kind to apply after the step
    pub feedback: BoundaryFeedback,
}

/// Metronome configuration parameters
#[derive(Copy, Clone, Debug)]
pub struct MetronomeConfig {
    /// Tempo index selected at startup
    pub start_index: usize,
    /// Base "tick" tone; the "tock" is one octave up
    pub beep_tone: u32,
    /// Scaled beep length fed to the square-wave emitter
    pub beep_duration: u32,
    /// Blocking debounce wait before sampling button edges
    pub debounce_ms: u64,
    /// Calibrated-cycle wait inserted before a mid-range LED re-assert
    pub boundary_pause_cycles: u32,
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            start_index: 13, // mid tempo
            beep_tone: 180,
            beep_duration: 75,
            debounce_ms: 500,
            boundary_pause_cycles: 1500,
        }
    }
}

impl MetronomeConfig {
    /// Create a new configuration with validation
    pub fn new(
        start_index: usize,
        beep_tone: u32,
        beep_duration: u32,
        debounce_ms: u64,
        boundary_pause_cycles: u32,
    ) -> Result<Self, &'static str> {
        if start_index > MAX_TEMPO_INDEX {
            return Err("Start index out of timing-table range");
        }
        if beep_tone == 0 || beep_tone > crate::beeper::SEMIPERIOD_DIVIDEND / 2 {
            return Err("Beep tone must yield a non-zero semiperiod for both tick and tock");
        }
        if beep_duration == 0 {
            return Err("Beep duration must be non-zero");
        }
        if debounce_ms == 0 || debounce_ms > 2000 {
            return Err("Debounce must be between 1 and 2000ms");
        }

        Ok(Self {
            start_index,
            beep_tone,
            beep_duration,
            debounce_ms,
            boundary_pause_cycles,
        })
    }

    /// Tone of the first beep of a cycle
    pub const fn tick_tone(&self) -> u32 {
        self.beep_tone
    }

    /// Tone of the second beep: one octave above the tick
    pub const fn tock_tone(&self) -> u32 {
        self.beep_tone * 2
    }

    /// Boundary-pause length as wall time
    #[cfg(feature = "embassy-time")]
    pub fn boundary_pause(&self) -> crate::hal::Duration {
        crate::hal::Duration::from_micros(
            self.boundary_pause_cycles as u64 * crate::hal::CAL_CYCLE_US as u64,
        )
    }
}
