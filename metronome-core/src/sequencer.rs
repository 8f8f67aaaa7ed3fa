//! Tick-tock sequencer: one full metronome cycle
//!
//! A cycle is two beeps an octave apart, each flanked by the tick LED and
//! followed by one beat interval of silence. The caller re-reads the tempo
//! index every cycle, so a tempo change never preempts an in-flight cycle;
//! it takes effect on the next one.

use crate::beeper::beep;
use crate::hal::{DelayTimer, OutputLine};
use crate::timings::duration_ms;
use crate::types::MetronomeConfig;

/// Blocking tick-tock driver
pub struct TickTockSequencer {
    config: MetronomeConfig,
}

impl TickTockSequencer {
    /// Create a sequencer with the given beep parameters
    pub const fn new(config: MetronomeConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &MetronomeConfig {
        &self.config
    }

    /// Run one full cycle at the beat interval selected by `index`
    ///
    /// `index` must already be clamped to the timing table range; the tempo
    /// selector guarantees this for every value it publishes.
    pub fn tick_tock<E, B, L, D>(
        &self,
        index: usize,
        beep_line: &mut B,
        tick_led: &mut L,
        delay: &mut D,
    ) -> Result<(), E>
    where
        B: OutputLine<Error = E>,
        L: OutputLine<Error = E>,
        D: DelayTimer<Error = E>,
    {
        let beat = duration_ms(index) as u32;

        tick_led.set_state(true)?;
        beep(beep_line, delay, self.config.tick_tone(), self.config.beep_duration)?;
        tick_led.set_state(false)?;
        delay.delay_ms(beat)?;

        tick_led.set_state(true)?;
        beep(beep_line, delay, self.config.tock_tone(), self.config.beep_duration)?;
        tick_led.set_state(false)?;
        delay.delay_ms(beat)?;

        Ok(())
    }
}

/// Async task driving the main loop: tick-tock forever at the current tempo
///
/// Beeps busy-wait through [`EmbassyDelay`](crate::hal::EmbassyDelay) (they
/// are a few milliseconds at most); the beat intervals yield to the
/// executor so the selector task can run between cycles.
#[cfg(feature = "embassy-time")]
pub async fn ticker_task<B, L>(
    tempo: &crate::selector::TempoSelector,
    beep_line: &mut B,
    tick_led: &mut L,
    config: MetronomeConfig,
) where
    B: OutputLine<Error = crate::hal::HalError>,
    L: OutputLine<Error = crate::hal::HalError>,
{
    use crate::hal::{Duration, EmbassyDelay};
    use embassy_time::Timer;

    let mut delay = EmbassyDelay;
    loop {
        let beat = duration_ms(tempo.index()) as u64;

        tick_led.set_state(true).ok();
        beep(beep_line, &mut delay, config.tick_tone(), config.beep_duration).ok();
        tick_led.set_state(false).ok();
        Timer::after(Duration::from_millis(beat)).await;

        tick_led.set_state(true).ok();
        beep(beep_line, &mut delay, config.tock_tone(), config.beep_duration).ok();
        tick_led.set_state(false).ok();
        Timer::after(Duration::from_millis(beat)).await;

        #[cfg(feature = "defmt")]
        defmt::trace!("tick-tock at index {}", tempo.index());
    }
}
