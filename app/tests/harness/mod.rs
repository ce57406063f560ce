//! Shared harness for the delayed-visibility suites: replays an input trace
//! against the timing gate in event-time order.
//!
//! The gate is clock-free; its deadlines are whatever timers the caller
//! arms. The harness computes both deadlines from the configured durations,
//! merges them with the input trace, and feeds everything to a fresh gate in
//! timestamp order. Ordering matches the production wiring: inputs keep
//! their relative order, a deadline sharing a timestamp with an input lands
//! after it, and the show deadline is merged ahead of the floor deadline.

use app::services::loading::DelayGate;

/// An input event observed at a millisecond offset from subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// The progress source emitted a value.
    Progress(bool),
    /// The completion signal emitted a value.
    Complete(bool),
}

/// Replays `trace` against a fresh gate and returns every emission with its
/// timestamp, including the seeded initial `false` at offset zero.
pub fn run_trace(after_ms: u64, at_least_ms: u64, trace: &[(u64, TraceEvent)]) -> Vec<(u64, bool)> {
    #[derive(Debug, Clone, Copy)]
    enum Step {
        Input(TraceEvent),
        ShowDeadline,
        FloorDeadline,
    }

    let mut steps: Vec<(u64, usize, Step)> = trace
        .iter()
        .enumerate()
        .map(|(index, (at, event))| (*at, index, Step::Input(*event)))
        .collect();
    steps.push((after_ms, usize::MAX - 1, Step::ShowDeadline));
    steps.push((after_ms + at_least_ms, usize::MAX, Step::FloorDeadline));
    steps.sort_by_key(|(at, order, _)| (*at, *order));

    let mut gate = DelayGate::new();
    let mut emissions = vec![(0, DelayGate::INITIAL)];
    for (at, _, step) in steps {
        let emission = match step {
            Step::Input(TraceEvent::Progress(value)) => gate.progress_changed(value),
            Step::Input(TraceEvent::Complete(value)) => gate.complete_changed(value),
            Step::ShowDeadline => gate.show_deadline(),
            Step::FloorDeadline => gate.floor_deadline(),
        };
        if let Some(value) = emission {
            emissions.push((at, value));
        }
    }
    emissions
}

/// The emitted values without their timestamps.
pub fn values(emissions: &[(u64, bool)]) -> Vec<bool> {
    emissions.iter().map(|(_at, value)| *value).collect()
}
