//! Tempo-selector behavior tests: stepping, tie-break, clamping, feedback

use metronome_core::test_utils::feedback_capture::FeedbackSummary;
use metronome_core::test_utils::press_simulator::{execute_pattern, PressPattern};
use metronome_core::{
    BoundaryFeedback, ButtonInput, ButtonSide, TempoChange, TempoSelector, MAX_TEMPO_INDEX,
};
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn test_overshoot_scenario_clamps_at_zero() {
    // Start mid-tempo, 5 faster then 20 slower: 13 + 5 - 20 saturates at 0
    let buttons = ButtonInput::new();
    let tempo = TempoSelector::new(13);

    let pattern = PressPattern::sequence(&[
        PressPattern::repeated(ButtonSide::Faster, 5),
        PressPattern::repeated(ButtonSide::Slower, 20),
    ]);
    let outcomes = execute_pattern(&buttons, &tempo, &pattern);

    assert_eq!(outcomes.len(), 25);
    assert_eq!(outcomes[4].index, 18);
    assert_eq!(tempo.index(), 0);

    // The last two slower presses were clamped
    assert_eq!(outcomes[23].change, TempoChange::Unchanged);
    assert_eq!(outcomes[24].change, TempoChange::Unchanged);

    let summary = FeedbackSummary::from_outcomes(&outcomes);
    assert!(summary.quick_flashes_only_at_edges(&outcomes, MAX_TEMPO_INDEX));
}

#[test]
fn test_alternating_presses_return_to_start() {
    let buttons = ButtonInput::new();
    let tempo = TempoSelector::new(20);

    let outcomes = execute_pattern(&buttons, &tempo, &PressPattern::alternating(10));
    assert_eq!(outcomes.len(), 10);
    assert_eq!(tempo.index(), 20);
    // Every press moved: never near a boundary in this scenario
    assert!(outcomes.iter().all(|o| o.change.is_change()));
}

#[rstest]
#[case(13, ButtonSide::Faster, 14, BoundaryFeedback::PausedFlash)]
#[case(13, ButtonSide::Slower, 12, BoundaryFeedback::PausedFlash)]
#[case(0, ButtonSide::Slower, 0, BoundaryFeedback::QuickFlash)]
#[case(MAX_TEMPO_INDEX, ButtonSide::Faster, MAX_TEMPO_INDEX, BoundaryFeedback::QuickFlash)]
#[case(1, ButtonSide::Slower, 0, BoundaryFeedback::QuickFlash)]
#[case(MAX_TEMPO_INDEX - 1, ButtonSide::Faster, MAX_TEMPO_INDEX, BoundaryFeedback::QuickFlash)]
#[case(MAX_TEMPO_INDEX, ButtonSide::Slower, MAX_TEMPO_INDEX - 1, BoundaryFeedback::PausedFlash)]
fn test_single_press_step(
    #[case] start: usize,
    #[case] side: ButtonSide,
    #[case] expected_index: usize,
    #[case] expected_feedback: BoundaryFeedback,
) {
    let buttons = ButtonInput::new();
    let tempo = TempoSelector::new(start);

    buttons.on_edge(side);
    let outcome = tempo.service(&buttons);

    assert_eq!(outcome.index, expected_index);
    assert_eq!(outcome.feedback, expected_feedback);
    assert!(outcome.latched);
    assert!(!buttons.any_pending(), "flags cleared unconditionally");
}

#[test]
fn test_simultaneous_press_favors_faster() {
    let buttons = ButtonInput::new();
    let tempo = TempoSelector::new(10);

    buttons.on_edge(ButtonSide::Faster);
    buttons.on_edge(ButtonSide::Slower);
    let outcome = tempo.service(&buttons);

    assert_eq!(outcome.change, TempoChange::Increased);
    assert_eq!(outcome.index, 11);
    // The losing edge is consumed, not deferred
    assert!(!buttons.any_pending());
}

/// Reference model of one service step: saturating step, faster-first
fn model_step(index: usize, side: ButtonSide) -> usize {
    match side {
        ButtonSide::Faster if index < MAX_TEMPO_INDEX => index + 1,
        ButtonSide::Slower if index > 0 => index - 1,
        _ => index,
    }
}

proptest! {
    #[test]
    fn prop_index_never_leaves_range(
        start in 0usize..=MAX_TEMPO_INDEX,
        presses in prop::collection::vec(prop::bool::ANY, 0..60),
    ) {
        let buttons = ButtonInput::new();
        let tempo = TempoSelector::new(start);

        for &faster in &presses {
            let side = if faster { ButtonSide::Faster } else { ButtonSide::Slower };
            buttons.on_edge(side);
            let outcome = tempo.service(&buttons);
            prop_assert!(outcome.index <= MAX_TEMPO_INDEX);
        }
    }

    #[test]
    fn prop_service_matches_reference_model(
        start in 0usize..=MAX_TEMPO_INDEX,
        presses in prop::collection::vec(prop::bool::ANY, 0..60),
    ) {
        let buttons = ButtonInput::new();
        let tempo = TempoSelector::new(start);
        let mut model = start;

        for &faster in &presses {
            let side = if faster { ButtonSide::Faster } else { ButtonSide::Slower };
            model = model_step(model, side);

            buttons.on_edge(side);
            let outcome = tempo.service(&buttons);
            prop_assert_eq!(outcome.index, model);
        }
        prop_assert_eq!(tempo.index(), model);
    }

    #[test]
    fn prop_quick_flash_exactly_at_edges(
        start in 0usize..=MAX_TEMPO_INDEX,
        presses in prop::collection::vec(prop::bool::ANY, 1..40),
    ) {
        let buttons = ButtonInput::new();
        let tempo = TempoSelector::new(start);

        for &faster in &presses {
            let side = if faster { ButtonSide::Faster } else { ButtonSide::Slower };
            buttons.on_edge(side);
            let outcome = tempo.service(&buttons);
            let at_edge = outcome.index == 0 || outcome.index == MAX_TEMPO_INDEX;
            prop_assert_eq!(outcome.feedback == BoundaryFeedback::QuickFlash, at_edge);
        }
    }
}
