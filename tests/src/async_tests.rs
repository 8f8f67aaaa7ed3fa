//! Async shape tests with tokio
//!
//! The embassy tasks themselves never return, so these tests exercise the
//! same wait-then-service discipline with tokio timers around the core
//! logic step.

use std::time::{Duration, Instant};

use metronome_core::{duration_ms, ButtonInput, ButtonSide, TempoSelector};

/// Debounce window used by the scenarios, scaled down from the firmware's
/// 500ms so the suite stays fast
const DEBOUNCE: Duration = Duration::from_millis(50);

#[tokio::test]
async fn test_timer_sanity() {
    let start = Instant::now();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let elapsed = start.elapsed();

    // Allow some tolerance for timing
    assert!(elapsed >= Duration::from_millis(95));
    assert!(elapsed <= Duration::from_millis(150));
}

#[tokio::test]
async fn test_bounce_burst_collapses_into_one_step() {
    let buttons = ButtonInput::new();
    let tempo = TempoSelector::new(13);

    // A mechanical bounce burst: several edges inside the debounce window
    for _ in 0..5 {
        buttons.on_edge(ButtonSide::Faster);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    // Sampling is deferred until the window has passed
    tokio::time::sleep(DEBOUNCE).await;
    let outcome = tempo.service(&buttons);

    assert_eq!(outcome.index, 14, "burst must count as one logical press");
    assert!(!buttons.any_pending());
}

#[tokio::test]
async fn test_press_during_cycle_applies_between_cycles() {
    let buttons = ButtonInput::new();
    let tempo = TempoSelector::new(13);

    // A scaled-down tick-tock cycle: the reader samples the index once per
    // cycle, never mid-cycle
    let mut cycle_indices = Vec::new();
    for cycle in 0..3 {
        let index = tempo.index();
        cycle_indices.push(index);

        // Beat wait, scaled down from duration_ms(index)
        let beat = Duration::from_micros(duration_ms(index) as u64);
        tokio::time::sleep(beat).await;

        if cycle == 0 {
            // Edge lands while the first cycle is in flight
            buttons.on_edge(ButtonSide::Faster);
        }
        tokio::time::sleep(beat).await;

        // Selector services between cycles
        if buttons.any_pending() {
            tokio::time::sleep(DEBOUNCE).await;
            tempo.service(&buttons);
        }
    }

    assert_eq!(cycle_indices, vec![13, 14, 14]);
}

#[tokio::test]
async fn test_concurrent_reader_sees_whole_updates() {
    use std::sync::Arc;

    let buttons = Arc::new(ButtonInput::new());
    let tempo = Arc::new(TempoSelector::new(13));

    // Writer: ten presses with a debounce-shaped gap
    let writer = {
        let buttons = Arc::clone(&buttons);
        let tempo = Arc::clone(&tempo);
        tokio::spawn(async move {
            for _ in 0..10 {
                buttons.on_edge(ButtonSide::Faster);
                tokio::time::sleep(Duration::from_millis(5)).await;
                tempo.service(&buttons);
            }
        })
    };

    // Reader: the sequencer side, polling the index between "cycles"
    let reader = {
        let tempo = Arc::clone(&tempo);
        tokio::spawn(async move {
            let mut last = tempo.index();
            for _ in 0..20 {
                let index = tempo.index();
                assert!(index >= last, "index must move monotonically here");
                assert!(index <= 23);
                last = index;
                tokio::time::sleep(Duration::from_millis(3)).await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(tempo.index(), 23);
}
