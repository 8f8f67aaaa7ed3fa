//! Test utilities for metronome core functionality

#[cfg(all(feature = "test-utils", feature = "embassy-time"))]
pub mod press_simulator {
    //! Button press simulation for testing

    use crate::selector::{ButtonInput, TempoSelector};
    use crate::types::{ButtonSide, SelectorOutcome};
    use heapless::{String, Vec};

    /// One simulated button edge
    #[derive(Debug, Clone)]
    pub struct PressEvent {
        pub side: ButtonSide,
    }

    /// A named sequence of button edges, each serviced in its own step
    #[derive(Debug, Clone)]
    pub struct PressPattern {
        pub events: Vec<PressEvent, 64>,
        pub description: String<32>,
    }

    impl PressPattern {
        /// `count` presses of one button
        pub fn repeated(side: ButtonSide, count: usize) -> Self {
            let mut events = Vec::new();
            for _ in 0..count {
                events.push(PressEvent { side }).ok();
            }
            let description = match side {
                ButtonSide::Faster => String::try_from("Faster xN").unwrap(),
                ButtonSide::Slower => String::try_from("Slower xN").unwrap(),
            };
            Self {
                events,
                description,
            }
        }

        /// Alternating faster/slower presses
        pub fn alternating(count: usize) -> Self {
            let mut events = Vec::new();
            let mut side = ButtonSide::Faster;
            for _ in 0..count {
                events.push(PressEvent { side }).ok();
                side = side.opposite();
            }
            Self {
                events,
                description: String::try_from("Alternating").unwrap(),
            }
        }

        /// Concatenate patterns
        pub fn sequence(patterns: &[PressPattern]) -> Self {
            let mut events = Vec::new();
            for pattern in patterns {
                for event in &pattern.events {
                    events.push(event.clone()).ok();
                }
            }
            Self {
                events,
                description: String::try_from("Sequence").unwrap(),
            }
        }
    }

    /// Latch and service every edge of a pattern, collecting the outcomes
    pub fn execute_pattern(
        buttons: &ButtonInput,
        tempo: &TempoSelector,
        pattern: &PressPattern,
    ) -> Vec<SelectorOutcome, 64> {
        let mut outcomes = Vec::new();
        for event in &pattern.events {
            buttons.on_edge(event.side);
            outcomes.push(tempo.service(buttons)).ok();
        }
        outcomes
    }
}

#[cfg(all(feature = "test-utils", feature = "embassy-time"))]
pub mod feedback_capture {
    //! Boundary LED feedback capture and analysis

    use crate::types::{BoundaryFeedback, SelectorOutcome};
    use heapless::Vec;

    /// Summary of the blink kinds produced by an outcome sequence
    #[derive(Debug, Default)]
    pub struct FeedbackSummary {
        pub quick_flashes: usize,
        pub paused_flashes: usize,
        pub index_trace: Vec<usize, 64>,
    }

    impl FeedbackSummary {
        pub fn from_outcomes(outcomes: &[SelectorOutcome]) -> Self {
            let mut summary = Self::default();
            for outcome in outcomes {
                match outcome.feedback {
                    BoundaryFeedback::QuickFlash => summary.quick_flashes += 1,
                    BoundaryFeedback::PausedFlash => summary.paused_flashes += 1,
                }
                summary.index_trace.push(outcome.index).ok();
            }
            summary
        }

        /// True if every quick flash coincides with a table edge landing
        pub fn quick_flashes_only_at_edges(
            &self,
            outcomes: &[SelectorOutcome],
            max_index: usize,
        ) -> bool {
            outcomes.iter().all(|o| {
                let at_edge = o.index == 0 || o.index == max_index;
                (o.feedback == BoundaryFeedback::QuickFlash) == at_edge
            })
        }
    }
}
