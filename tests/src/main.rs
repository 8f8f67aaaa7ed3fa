// Host-level integration checks, runnable without the test harness

use metronome_core::{
    bpm, duration_ms, semiperiod_us, toggle_pairs, MetronomeConfig, NUM_TEMPOS,
};

fn main() {
    println!("Metronome integration checks");

    check_timing_table();
    check_beep_arithmetic();
    check_config_validation();

    println!("All integration checks passed");
    println!();
    println!("Run the full suite with: cargo test");
}

/// The compiled-in table must be strictly decreasing over its whole range
fn check_timing_table() {
    println!("Checking timing table...");

    assert_eq!(NUM_TEMPOS, 39);
    for i in 1..NUM_TEMPOS {
        assert!(duration_ms(i) < duration_ms(i - 1));
    }
    assert_eq!(bpm(0), 40);
    assert_eq!(bpm(NUM_TEMPOS - 1), 208);

    println!("  timing table ok ({} tempos, {}-{} bpm)", NUM_TEMPOS, bpm(0), bpm(NUM_TEMPOS - 1));
}

/// The emitter's truncating arithmetic at the reference tone
fn check_beep_arithmetic() {
    println!("Checking beep arithmetic...");

    assert_eq!(semiperiod_us(180), 347);
    assert_eq!(toggle_pairs(180, 75), 21);
    assert_eq!(toggle_pairs(360, 75), 43);
    assert_eq!(toggle_pairs(0, 75), 0);

    println!("  beep arithmetic ok");
}

fn check_config_validation() {
    println!("Checking config validation...");

    assert!(MetronomeConfig::new(13, 180, 75, 500, 1500).is_ok());
    assert!(MetronomeConfig::new(39, 180, 75, 500, 1500).is_err());
    assert!(MetronomeConfig::new(13, 0, 75, 500, 1500).is_err());
    assert!(MetronomeConfig::new(13, 180, 0, 500, 1500).is_err());
    assert!(MetronomeConfig::new(13, 180, 75, 0, 1500).is_err());

    println!("  config validation ok");
}
