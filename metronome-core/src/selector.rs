//! Tempo selector: the interrupt-context state machine
//!
//! Button edges latch atomic pending flags from interrupt context; the
//! service step samples them after the debounce wait, steps the shared
//! tempo index with saturation, and decides the boundary LED feedback.
//! Single writer (the service step), single reader (the sequencer loop),
//! no locks.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::timings::MAX_TEMPO_INDEX;
use crate::types::{BoundaryFeedback, ButtonSide, SelectorOutcome, TempoChange};

/// Atomic button edge state
///
/// One pending flag per physical line, last-edge-wins: a bounce burst or a
/// repeated press before service collapses into a single latched edge. No
/// event queue exists.
pub struct ButtonInput {
    faster_pending: AtomicBool,
    slower_pending: AtomicBool,
}

impl ButtonInput {
    /// Create new button input state
    pub const fn new() -> Self {
        Self {
            faster_pending: AtomicBool::new(false),
            slower_pending: AtomicBool::new(false),
        }
    }

    /// Latch a falling edge (called from interrupt handler)
    ///
    /// A single flag store: the service step does not care when the edge
    /// arrived, only that one did since the last clear.
    ///
    /// # Safety
    /// This function is safe to call from interrupt context
    pub fn on_edge(&self, side: ButtonSide) {
        match side {
            ButtonSide::Faster => self.faster_pending.store(true, Ordering::Relaxed),
            ButtonSide::Slower => self.slower_pending.store(true, Ordering::Relaxed),
        }
    }

    /// Check if a "faster" edge is pending
    pub fn faster_pending(&self) -> bool {
        self.faster_pending.load(Ordering::Relaxed)
    }

    /// Check if a "slower" edge is pending
    pub fn slower_pending(&self) -> bool {
        self.slower_pending.load(Ordering::Relaxed)
    }

    /// Check if either line has a pending edge
    pub fn any_pending(&self) -> bool {
        self.faster_pending() || self.slower_pending()
    }

    /// Clear both pending flags unconditionally
    ///
    /// Run at the end of every service step, whether or not an edge was
    /// latched, so the next physical edge can be detected.
    pub fn clear_all(&self) {
        self.faster_pending.store(false, Ordering::Relaxed);
        self.slower_pending.store(false, Ordering::Relaxed);
    }
}

impl Default for ButtonInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared tempo index with saturating selection logic
///
/// The index is a single aligned integer in `[0, MAX_TEMPO_INDEX]`; it is
/// mutated only inside [`service`](TempoSelector::service), so the sequencer
/// loop can read it between cycles without synchronization beyond the
/// atomic load.
pub struct TempoSelector {
    index: AtomicUsize,
}

impl TempoSelector {
    /// Create a selector starting at `start_index` (clamped to the table)
    pub const fn new(start_index: usize) -> Self {
        let start = if start_index > MAX_TEMPO_INDEX {
            MAX_TEMPO_INDEX
        } else {
            start_index
        };
        Self {
            index: AtomicUsize::new(start),
        }
    }

    /// Current tempo index
    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    /// Service one button-edge event: the logic step, no waits, no I/O
    ///
    /// Call after the debounce wait has settled the bounce burst. Exactly
    /// one direction is processed per invocation; a faster edge wins a tie.
    /// A press clamped at a table edge mutates nothing but still reports
    /// `latched`, driving the quick-flash limit indication. Both pending
    /// flags are cleared before returning.
    pub fn service(&self, buttons: &ButtonInput) -> SelectorOutcome {
        let faster = buttons.faster_pending();
        let slower = buttons.slower_pending();
        let before = self.index.load(Ordering::Relaxed);

        let (after, change) = if faster && before < MAX_TEMPO_INDEX {
            (before + 1, TempoChange::Increased)
        } else if slower && before > 0 {
            (before - 1, TempoChange::Decreased)
        } else {
            (before, TempoChange::Unchanged)
        };

        if change.is_change() {
            self.index.store(after, Ordering::Relaxed);
        }

        // Mid-range landings get the longer, paused blink; landing on (or
        // being held at) either extreme re-asserts the LED immediately.
        let feedback = if after != 0 && after != MAX_TEMPO_INDEX {
            BoundaryFeedback::PausedFlash
        } else {
            BoundaryFeedback::QuickFlash
        };

        buttons.clear_all();

        SelectorOutcome {
            change,
            index: after,
            latched: faster || slower,
            feedback,
        }
    }

    /// Full blocking service routine: debounce, logic step, LED feedback
    ///
    /// This is the interrupt-context shape of the selector: a blocking
    /// debounce wait before sampling, LED off while "moving", the calibrated
    /// pause only for mid-range landings, LED back on at the end.
    pub fn service_with_feedback<E, L, D>(
        &self,
        buttons: &ButtonInput,
        boundary_led: &mut L,
        delay: &mut D,
        config: &crate::types::MetronomeConfig,
    ) -> Result<SelectorOutcome, E>
    where
        L: crate::hal::OutputLine<Error = E>,
        D: crate::hal::DelayTimer<Error = E>,
    {
        delay.delay_ms(config.debounce_ms as u32)?;

        let outcome = self.service(buttons);

        if outcome.latched {
            boundary_led.set_state(false)?;
        }
        if outcome.feedback.has_pause() {
            delay.delay_cal(config.boundary_pause_cycles)?;
        }
        boundary_led.set_state(true)?;

        Ok(outcome)
    }

    /// Reset the index (for testing)
    #[cfg(feature = "test-utils")]
    pub fn set_index(&self, index: usize) {
        self.index
            .store(index.min(MAX_TEMPO_INDEX), Ordering::Relaxed);
    }
}

/// Async task servicing button edges with debounce and LED feedback
///
/// Polls the pending flags; on an edge, waits out the debounce window
/// before sampling, then applies the logic step and the blink convention.
/// The waits here are the pacing of the original interrupt routine, so the
/// sequencer simply sees the index change between cycles.
#[cfg(feature = "embassy-time")]
pub async fn selector_task<E, L>(
    buttons: &ButtonInput,
    tempo: &TempoSelector,
    boundary_led: &mut L,
    config: crate::types::MetronomeConfig,
) where
    L: crate::hal::OutputLine<Error = E>,
{
    use crate::hal::Duration;
    use embassy_time::Timer;

    // Edge poll granularity; well under the debounce window
    const POLL_INTERVAL_MS: u64 = 10;

    loop {
        if buttons.any_pending() {
            Timer::after(Duration::from_millis(config.debounce_ms)).await;

            let outcome = tempo.service(buttons);
            if outcome.latched {
                boundary_led.set_state(false).ok();
            }
            if outcome.feedback.has_pause() {
                Timer::after(config.boundary_pause()).await;
            }
            boundary_led.set_state(true).ok();

            #[cfg(feature = "defmt")]
            defmt::debug!("tempo index now {}", outcome.index);
        }
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
