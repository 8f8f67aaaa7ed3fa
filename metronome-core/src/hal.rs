//! Hardware Abstraction Layer for the metronome

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock instant type for compilation without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub fn now() -> Self {
            Self(0) // Placeholder implementation
        }

        pub fn from_millis(ms: i64) -> Self {
            Self(ms as u64)
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(other.0))
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }

    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub fn from_micros(us: u64) -> Self {
            Self(us / 1000)
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }
}

use crate::types::ButtonSide;
use embedded_hal::digital::{InputPin, OutputPin};

/// Calibration constant tying one raw delay cycle to real microseconds.
///
/// The busy-wait loop body costs 56 MCU cycles; at the nominal 1 MHz clock
/// one `delay_cal` unit is therefore 56us of wall time.
pub const CAL_CYCLE_US: u32 = 56;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Timing operation failed
    TimingError,
    /// Interrupt configuration failed
    InterruptError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::TimingError => write!(f, "Timing operation failed"),
            HalError::InterruptError => write!(f, "Interrupt configuration failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for tempo button input handling
pub trait ButtonLine {
    type Error: From<HalError>;

    /// Check if the button is currently pressed
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;

    /// Get timestamp of last edge transition
    fn last_edge_time(&self) -> Option<Instant>;

    /// Enable falling-edge interrupts for this button
    fn enable_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Disable edge interrupts for this button
    fn disable_interrupt(&mut self) -> Result<(), Self::Error>;
}

/// Trait for driven output lines (beeper, LEDs)
pub trait OutputLine {
    type Error: From<HalError>;

    /// Set line state (true = high, false = low)
    fn set_state(&mut self, state: bool) -> Result<(), Self::Error>;

    /// Get current line state
    fn get_state(&self) -> Result<bool, Self::Error>;

    /// Toggle line state
    fn toggle(&mut self) -> Result<(), Self::Error> {
        let current = self.get_state()?;
        self.set_state(!current)
    }
}

/// Trait for blocking busy-wait delays at the three granularities the
/// metronome depends on
pub trait DelayTimer {
    type Error: From<HalError>;

    /// Block for approximately `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error>;

    /// Block for approximately `us` microseconds
    fn delay_us(&mut self, us: u32) -> Result<(), Self::Error>;

    /// Block for `cycles` raw calibrated cycles (see [`CAL_CYCLE_US`])
    fn delay_cal(&mut self, cycles: u32) -> Result<(), Self::Error>;
}

/// Trait for interrupt configuration
pub trait InterruptConfig {
    type Error: From<HalError>;

    /// Configure edge detection for a button input
    fn configure_button_interrupt(
        &mut self,
        button: ButtonSide,
        rising: bool,
        falling: bool,
    ) -> Result<(), Self::Error>;

    /// Enable/disable a specific button interrupt
    fn enable_button_interrupt(
        &mut self,
        button: ButtonSide,
        enable: bool,
    ) -> Result<(), Self::Error>;
}

/// Complete metronome HAL interface
pub trait MetronomeHal {
    type FasterButton: ButtonLine;
    type SlowerButton: ButtonLine;
    type BeepLine: OutputLine;
    type TickLed: OutputLine;
    type BoundaryLed: OutputLine;
    type Delay: DelayTimer;
    type InterruptCtrl: InterruptConfig;
    type Error: From<HalError>;

    /// Initialize hardware: watchdog off, clock set, pins configured,
    /// interrupts armed
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Access to the "faster" button
    fn faster_button(&mut self) -> &mut Self::FasterButton;

    /// Access to the "slower" button
    fn slower_button(&mut self) -> &mut Self::SlowerButton;

    /// Access to the speaker drive line
    fn beep_line(&mut self) -> &mut Self::BeepLine;

    /// Access to the tick indicator LED
    fn tick_led(&mut self) -> &mut Self::TickLed;

    /// Access to the boundary feedback LED
    fn boundary_led(&mut self) -> &mut Self::BoundaryLed;

    /// Access to the busy-wait delay source
    fn delay(&mut self) -> &mut Self::Delay;

    /// Access to the interrupt controller
    fn interrupt_controller(&mut self) -> &mut Self::InterruptCtrl;

    /// Shutdown hardware
    fn shutdown(&mut self) -> Result<(), Self::Error>;
}

/// Generic implementation for embedded-hal compatible input pins
pub struct EmbeddedHalButton<P> {
    pin: P,
    last_edge: Option<Instant>,
}

impl<P> EmbeddedHalButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_edge: None,
        }
    }

    /// Update edge time (called from interrupt handler)
    pub fn update_edge_time(&mut self, time: Instant) {
        self.last_edge = Some(time);
    }
}

impl<P> ButtonLine for EmbeddedHalButton<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        // Pulled up, grounded when pressed
        self.pin.is_low().map_err(|_| HalError::GpioError)
    }

    fn last_edge_time(&self) -> Option<Instant> {
        self.last_edge
    }

    fn enable_interrupt(&mut self) -> Result<(), Self::Error> {
        // Platform-specific implementation required
        Err(HalError::InterruptError)
    }

    fn disable_interrupt(&mut self) -> Result<(), Self::Error> {
        // Platform-specific implementation required
        Err(HalError::InterruptError)
    }
}

/// Generic implementation for embedded-hal compatible output pins
pub struct EmbeddedHalOutputLine<P> {
    pin: P,
    state: bool,
}

impl<P> EmbeddedHalOutputLine<P>
where
    P: OutputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin, state: false }
    }
}

impl<P> OutputLine for EmbeddedHalOutputLine<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
        if state {
            self.pin.set_high().map_err(|_| HalError::GpioError)?;
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)?;
        }
        self.state = state;
        Ok(())
    }

    fn get_state(&self) -> Result<bool, Self::Error> {
        // embedded-hal output pins cannot be read back; mirror the last
        // commanded state instead
        Ok(self.state)
    }
}

/// Busy-wait delay source backed by the embassy time driver
#[cfg(feature = "embassy-time")]
pub struct EmbassyDelay;

#[cfg(feature = "embassy-time")]
impl DelayTimer for EmbassyDelay {
    type Error = HalError;

    fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error> {
        embassy_time::block_for(Duration::from_millis(ms as u64));
        Ok(())
    }

    fn delay_us(&mut self, us: u32) -> Result<(), Self::Error> {
        embassy_time::block_for(Duration::from_micros(us as u64));
        Ok(())
    }

    fn delay_cal(&mut self, cycles: u32) -> Result<(), Self::Error> {
        embassy_time::block_for(Duration::from_micros(
            cycles as u64 * CAL_CYCLE_US as u64,
        ));
        Ok(())
    }
}

/// No-op interrupt controller for basic implementations
pub struct NoOpInterruptController;

impl InterruptConfig for NoOpInterruptController {
    type Error = HalError;

    fn configure_button_interrupt(
        &mut self,
        _button: ButtonSide,
        _rising: bool,
        _falling: bool,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enable_button_interrupt(
        &mut self,
        _button: ButtonSide,
        _enable: bool,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::{Cell, RefCell};
    use heapless::Vec;

    /// Output line identity in the trace log
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum LineId {
        Beeper,
        TickLed,
        BoundaryLed,
    }

    /// One recorded HAL side effect
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum TraceEvent {
        Set { line: LineId, high: bool },
        DelayMs(u32),
        DelayUs(u32),
        DelayCal(u32),
    }

    /// Shared side-effect log for ordering assertions across mocks
    #[derive(Default)]
    pub struct TraceLog {
        events: RefCell<Vec<TraceEvent, 512>>,
    }

    impl TraceLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn record(&self, event: TraceEvent) {
            self.events.borrow_mut().push(event).ok();
        }

        /// Snapshot of the recorded events, oldest first
        pub fn events(&self) -> Vec<TraceEvent, 512> {
            self.events.borrow().clone()
        }

        pub fn clear(&self) {
            self.events.borrow_mut().clear();
        }

        /// Count of recorded rising transitions on one line
        pub fn rising_edges(&self, line: LineId) -> usize {
            self.events
                .borrow()
                .iter()
                .filter(|e| matches!(e, TraceEvent::Set { line: l, high: true } if *l == line))
                .count()
        }
    }

    /// Mock button input
    #[derive(Default)]
    pub struct MockButton {
        pressed: RefCell<bool>,
        last_edge: RefCell<Option<Instant>>,
    }

    impl MockButton {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_pressed(&self, pressed: bool) {
            *self.pressed.borrow_mut() = pressed;
            if pressed {
                *self.last_edge.borrow_mut() = Some(Instant::now());
            }
        }
    }

    impl ButtonLine for MockButton {
        type Error = HalError;

        fn is_pressed(&mut self) -> Result<bool, Self::Error> {
            Ok(*self.pressed.borrow())
        }

        fn last_edge_time(&self) -> Option<Instant> {
            *self.last_edge.borrow()
        }

        fn enable_interrupt(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn disable_interrupt(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Mock output line, optionally tracing into a shared log
    pub struct MockOutputLine<'a> {
        id: LineId,
        state: Cell<bool>,
        log: Option<&'a TraceLog>,
    }

    impl<'a> MockOutputLine<'a> {
        pub fn new(id: LineId) -> Self {
            Self {
                id,
                state: Cell::new(false),
                log: None,
            }
        }

        pub fn with_log(id: LineId, log: &'a TraceLog) -> Self {
            Self {
                id,
                state: Cell::new(false),
                log: Some(log),
            }
        }

        pub fn is_high(&self) -> bool {
            self.state.get()
        }
    }

    impl OutputLine for MockOutputLine<'_> {
        type Error = HalError;

        fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
            if let Some(log) = self.log {
                log.record(TraceEvent::Set {
                    line: self.id,
                    high: state,
                });
            }
            self.state.set(state);
            Ok(())
        }

        fn get_state(&self) -> Result<bool, Self::Error> {
            Ok(self.state.get())
        }
    }

    /// Mock delay timer recording every wait instead of blocking
    pub struct MockDelay<'a> {
        log: Option<&'a TraceLog>,
        total_us: Cell<u64>,
    }

    impl<'a> MockDelay<'a> {
        pub fn new() -> Self {
            Self {
                log: None,
                total_us: Cell::new(0),
            }
        }

        pub fn with_log(log: &'a TraceLog) -> Self {
            Self {
                log: Some(log),
                total_us: Cell::new(0),
            }
        }

        /// Total simulated wait in microseconds
        pub fn total_us(&self) -> u64 {
            self.total_us.get()
        }
    }

    impl Default for MockDelay<'_> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DelayTimer for MockDelay<'_> {
        type Error = HalError;

        fn delay_ms(&mut self, ms: u32) -> Result<(), Self::Error> {
            if let Some(log) = self.log {
                log.record(TraceEvent::DelayMs(ms));
            }
            self.total_us.set(self.total_us.get() + ms as u64 * 1000);
            Ok(())
        }

        fn delay_us(&mut self, us: u32) -> Result<(), Self::Error> {
            if let Some(log) = self.log {
                log.record(TraceEvent::DelayUs(us));
            }
            self.total_us.set(self.total_us.get() + us as u64);
            Ok(())
        }

        fn delay_cal(&mut self, cycles: u32) -> Result<(), Self::Error> {
            if let Some(log) = self.log {
                log.record(TraceEvent::DelayCal(cycles));
            }
            self.total_us
                .set(self.total_us.get() + cycles as u64 * CAL_CYCLE_US as u64);
            Ok(())
        }
    }
}
