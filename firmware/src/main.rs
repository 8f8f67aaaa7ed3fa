#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
use panic_halt as _;

use embassy_executor::Spawner;
use embassy_time::Duration;
use static_cell::StaticCell;

use metronome_core::*;
use rustynome_firmware::*;

// Static resources: the one shared index and the button edge flags.
// Single writer (selector task), single reader (ticker task).
static BUTTONS: ButtonInput = ButtonInput::new();
static TEMPO: TempoSelector = TempoSelector::new(13);
static HAL: StaticCell<Ch32v203MetronomeHal> = StaticCell::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("Rustynome firmware starting...");

    // Initialize CH32V203 hardware: watchdog off, clock set, pins and
    // button-edge interrupts configured
    let hal = HAL.init(Ch32v203MetronomeHal::new());
    if hal.initialize().is_err() {
        #[cfg(feature = "defmt")]
        defmt::error!("Hardware init failed");
        loop {
            embassy_time::Timer::after(Duration::from_secs(1)).await;
        }
    }
    #[cfg(feature = "defmt")]
    defmt::info!("Hardware initialized");

    // Audible power-on confirmation
    startup_chirp(hal).ok();

    let config = default_config();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "Metronome config: start index {}, tone {}",
        config.start_index,
        config.beep_tone
    );

    // Spawn the main loop and the button service
    spawner.must_spawn(ticker_task_wrapper(&TEMPO, config));
    spawner.must_spawn(selector_task_wrapper(&BUTTONS, &TEMPO, config));

    #[cfg(feature = "defmt")]
    defmt::info!("Metronome ready");

    // Main supervision loop
    loop {
        embassy_time::Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("heartbeat, index {}", TEMPO.index());
    }
}

// EXTI handlers for the two button lines. Each latches a pending edge;
// the selector task samples and clears them after the debounce window.

#[no_mangle]
pub extern "C" fn EXTI3_IRQHandler() {
    BUTTONS.on_edge(ButtonSide::Faster);
    // EXTI PR write-1-to-clear for line 3
}

#[no_mangle]
pub extern "C" fn EXTI4_IRQHandler() {
    BUTTONS.on_edge(ButtonSide::Slower);
    // EXTI PR write-1-to-clear for line 4
}
