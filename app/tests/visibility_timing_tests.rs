//! Trace-level tests for the delayed-visibility timing policy: flicker
//! suppression, the minimum-display floor, the initial value, and duplicate
//! suppression.

mod harness;

use harness::{TraceEvent::Complete, TraceEvent::Progress, run_trace, values};

const AFTER: u64 = 650;
const AT_LEAST: u64 = 1000;

/// Asserts no two consecutive emissions carry the same value.
fn assert_no_consecutive_duplicates(emissions: &[(u64, bool)]) {
    let emitted = values(emissions);
    for window in emitted.windows(2) {
        assert_ne!(window[0], window[1], "duplicate emission in {emitted:?}");
    }
}

#[test]
fn operations_shorter_than_the_threshold_never_show() {
    for finish_at in [1, 100, 300, 649] {
        let emissions = run_trace(
            AFTER,
            AT_LEAST,
            &[
                (0, Progress(true)),
                (finish_at, Progress(false)),
                (finish_at, Complete(true)),
            ],
        );

        assert!(
            !values(&emissions).contains(&true),
            "spinner showed for an operation finishing at {finish_at}ms"
        );
        assert_no_consecutive_duplicates(&emissions);
    }
}

#[test]
fn finishing_exactly_at_the_threshold_still_suppresses() {
    // The progress source lands its `false` in the same tick the show
    // deadline fires; arrival order puts the input first.
    let emissions = run_trace(
        AFTER,
        AT_LEAST,
        &[(0, Progress(true)), (AFTER, Progress(false)), (AFTER, Complete(true))],
    );
    assert_eq!(values(&emissions), vec![false]);
}

#[test]
fn early_completion_holds_until_the_display_floor() {
    // Operation finishes right after the spinner shows; the hide is held
    // until `after + at_least`.
    let emissions = run_trace(
        AFTER,
        AT_LEAST,
        &[(0, Progress(true)), (700, Progress(false)), (700, Complete(true))],
    );

    assert_eq!(emissions, vec![(0, false), (AFTER, true), (AFTER + AT_LEAST, false)]);
}

#[test]
fn late_completion_delays_the_hide_past_the_floor() {
    let finish_at = 3000;
    let emissions = run_trace(
        AFTER,
        AT_LEAST,
        &[
            (0, Progress(true)),
            (finish_at, Progress(false)),
            (finish_at, Complete(true)),
        ],
    );

    assert_eq!(emissions, vec![(0, false), (AFTER, true), (finish_at, false)]);
}

#[test]
fn hide_never_lands_before_the_floor() {
    for finish_at in [651, 900, 1200, 1649] {
        let emissions = run_trace(
            AFTER,
            AT_LEAST,
            &[
                (0, Progress(true)),
                (finish_at, Progress(false)),
                (finish_at, Complete(true)),
            ],
        );

        let hide_at = emissions
            .iter()
            .skip(1)
            .find(|(_at, value)| !value)
            .map(|(at, _value)| *at)
            .expect("spinner never hid");
        assert!(
            hide_at >= AFTER + AT_LEAST,
            "spinner hid at {hide_at}ms for an operation finishing at {finish_at}ms"
        );
    }
}

#[test]
fn initial_value_is_false_for_any_trace() {
    let traces: [&[(u64, harness::TraceEvent)]; 4] = [
        &[],
        &[(0, Progress(false))],
        &[(0, Progress(true))],
        &[(0, Complete(true))],
    ];
    for trace in traces {
        let emissions = run_trace(AFTER, AT_LEAST, trace);
        assert_eq!(emissions[0], (0, false));
    }
}

#[test]
fn idle_sources_emit_nothing_beyond_the_seed() {
    // No operation ever starts; both deadlines pass silently and the hide
    // branch's `false` collapses into the seed.
    let emissions = run_trace(AFTER, AT_LEAST, &[(5, Complete(true))]);
    assert_eq!(emissions, vec![(0, false)]);
}

#[test]
fn completion_toggles_produce_no_duplicates() {
    let emissions = run_trace(
        AFTER,
        AT_LEAST,
        &[
            (0, Progress(true)),
            (800, Complete(true)),
            (900, Complete(false)),
            (2000, Complete(true)),
            (2100, Complete(true)),
        ],
    );

    assert_eq!(emissions, vec![(0, false), (AFTER, true), (2000, false)]);
    assert_no_consecutive_duplicates(&emissions);
}

#[test]
fn zero_floor_shows_then_hides_in_merge_order() {
    // With `at_least == 0` both deadlines share an instant; the show branch
    // is merged ahead of the hide branch.
    let emissions = run_trace(
        AFTER,
        0,
        &[(0, Progress(true)), (100, Complete(true))],
    );
    assert_eq!(emissions, vec![(0, false), (AFTER, true), (AFTER, false)]);
}

#[test]
fn zero_threshold_depends_on_the_cached_value() {
    // `after == 0` fires the show deadline immediately; the cached progress
    // value is still false when nothing has emitted yet.
    let emissions = run_trace(0, AT_LEAST, &[(1, Progress(true))]);
    assert_eq!(values(&emissions), vec![false]);

    // An emission in the same tick, ahead of the deadline, is observed.
    let emissions = run_trace(0, AT_LEAST, &[(0, Progress(true))]);
    assert_eq!(values(&emissions), vec![false, true]);
}
