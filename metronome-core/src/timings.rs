//! Fixed beat-interval timing table
//!
//! One entry per selectable tempo, slowest first. The values correspond to
//! 40, 42, 44, 46, 48, 50, 52, 54, 56, 58, 60, 63, 66, 69, 72, 76, 80, 84,
//! 88, 92, 96, 100, 104, 108, 112, 116, 120, 126, 132, 138, 144, 152, 160,
//! 168, 176, 184, 192, 200 and 208 beats per minute, the scale printed on a
//! mechanical metronome.

/// Number of selectable tempos
pub const NUM_TEMPOS: usize = 39;

/// Highest valid tempo index
pub const MAX_TEMPO_INDEX: usize = NUM_TEMPOS - 1;

/// Beat intervals in milliseconds, strictly decreasing, compiled read-only
pub const TIMINGS: [u16; NUM_TEMPOS] = [
    1500, 1429, 1364, 1304, 1250, 1200, 1154, 1111, 1071, 1034, 1000, 952,
    909, 870, 833, 789, 750, 714, 682, 652, 625, 600, 577, 556, 536, 517,
    500, 476, 455, 435, 417, 395, 375, 357, 341, 326, 313, 300, 288,
];

/// Beat interval for a tempo index, in milliseconds
///
/// Pure lookup. Callers must pass a clamped index; the tempo selector never
/// produces a value outside `[0, MAX_TEMPO_INDEX]`.
pub const fn duration_ms(index: usize) -> u16 {
    TIMINGS[index]
}

/// Approximate beats per minute for a tempo index
pub const fn bpm(index: usize) -> u16 {
    60_000 / TIMINGS[index]
}
