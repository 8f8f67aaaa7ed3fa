#![no_std]

//! Firmware library: hardware bindings and the embassy task wrappers

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use static_cell::StaticCell;

pub use metronome_core::*;

// Re-export hardware implementations
pub use crate::ch32v203_hardware::*;
pub use crate::tasks::*;

// Embassy tasks module
pub mod tasks {
    use super::*;
    use crate::ch32v203_hardware::{BeepOutputPin, BoundaryLedPin, TickLedPin};

    /// Main-loop task: tick-tock forever on the real speaker/LED pins
    #[embassy_executor::task]
    pub async fn ticker_task_wrapper(tempo: &'static TempoSelector, config: MetronomeConfig) {
        #[cfg(feature = "defmt")]
        defmt::info!("Ticker task started");
        let mut beep_line = BeepOutputPin::new();
        let mut tick_led = TickLedPin::new();
        metronome_core::sequencer::ticker_task(tempo, &mut beep_line, &mut tick_led, config)
            .await;
    }

    /// Button service task: debounce, tempo step, boundary LED feedback
    #[embassy_executor::task]
    pub async fn selector_task_wrapper(
        buttons: &'static ButtonInput,
        tempo: &'static TempoSelector,
        config: MetronomeConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("Selector task started");
        let mut boundary_led = BoundaryLedPin::new();
        metronome_core::selector::selector_task(buttons, tempo, &mut boundary_led, config).await;
    }
}

// CH32V203 hardware module
pub mod ch32v203_hardware;

// Time driver for embassy
mod time_driver;
