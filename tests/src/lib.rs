//! Host-based tests for the metronome firmware
//!
//! The core logic is synchronous and clock-free, so most coverage lives in
//! plain unit tests over the mock HAL; the async module checks the task
//! shapes under tokio.

#[cfg(test)]
mod selector_behavior_tests;


#[cfg(test)]
mod async_tests;
