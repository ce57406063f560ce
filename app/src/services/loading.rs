//! Loading-indicator service.
//!
//! Operations that finish quickly should never flash a spinner, and a spinner
//! that does appear should stay long enough to be legible. [`with_delay`]
//! derives a visibility signal from a boolean progress signal under that
//! policy: the indicator appears only once the operation has been running for
//! `after`, and once shown it is held until at least `after + at_least` past
//! subscription and the completion signal has fired.
//!
//! The timing policy itself lives in [`DelayGate`], a pure event-step state
//! machine; the Leptos layer only arms the two one-shot timers and mirrors
//! signal changes into it. That split keeps the policy testable without a
//! reactive runtime or a real clock.

use std::time::Duration;

use leptos::prelude::*;

/// Debounce threshold before a spinner may appear.
pub const SHOW_AFTER: Duration = Duration::from_millis(650);
/// Minimum time a spinner stays visible once shown.
pub const SHOW_AT_LEAST: Duration = Duration::from_millis(1000);

/// The spinner timing policy as a pure state machine.
///
/// Event sources feed it through one method each: the latest progress value,
/// the latest completion value, the show deadline (`after` elapsed since
/// subscription), and the floor deadline (`after + at_least` elapsed). Each
/// method returns the emission the event produces, if any; consecutive
/// duplicate emissions are suppressed internally, and the downstream signal
/// is seeded with [`DelayGate::INITIAL`].
///
/// Both durations are unchecked preconditions: the caller is responsible for
/// sane values, and the deadlines are whatever timers the caller arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayGate {
    in_flight: bool,
    complete: bool,
    floor_elapsed: bool,
    last_emitted: bool,
}

impl DelayGate {
    /// The seed value of the visibility output.
    pub const INITIAL: bool = false;

    #[must_use]
    pub fn new() -> Self {
        Self {
            in_flight: false,
            complete: false,
            floor_elapsed: false,
            last_emitted: Self::INITIAL,
        }
    }

    /// The progress source emitted a new value. Cached so the show deadline
    /// can tell whether the operation is still running; never emits by
    /// itself.
    pub fn progress_changed(&mut self, in_flight: bool) -> Option<bool> {
        self.in_flight = in_flight;
        None
    }

    /// The completion signal emitted a new value. Emits `false` once the
    /// minimum-display floor has also elapsed.
    pub fn complete_changed(&mut self, complete: bool) -> Option<bool> {
        self.complete = complete;
        if self.floor_elapsed && self.complete {
            self.emit(false)
        } else {
            None
        }
    }

    /// The `after` timer fired. Emits `true` while the operation is still
    /// running; suppressed when it already finished, which is what keeps
    /// short operations from flashing the indicator.
    pub fn show_deadline(&mut self) -> Option<bool> {
        if self.in_flight {
            self.emit(true)
        } else {
            None
        }
    }

    /// The `after + at_least` timer fired. Emits `false` once the operation
    /// has also been marked complete.
    pub fn floor_deadline(&mut self) -> Option<bool> {
        self.floor_elapsed = true;
        if self.complete {
            self.emit(false)
        } else {
            None
        }
    }

    fn emit(&mut self, value: bool) -> Option<bool> {
        if value == self.last_emitted {
            return None;
        }
        self.last_emitted = value;
        Some(value)
    }
}

impl Default for DelayGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a spinner visibility signal from `watch` under the delay policy.
///
/// `complete` is the completion signal for the tracked operation and is an
/// explicit parameter, so concurrent indicators with different sources do not
/// share state. The returned signal starts `false`, never repeats a value,
/// and follows the invariants documented on [`DelayGate`].
///
/// Timers and effects only run in the browser; during server rendering the
/// output stays at the seeded `false`. Tearing down the owning component
/// clears both pending timers.
pub fn with_delay(
    watch: Signal<bool>,
    complete: Signal<bool>,
    after: Duration,
    at_least: Duration,
) -> Signal<bool> {
    let gate = StoredValue::new(DelayGate::new());
    let output = RwSignal::new(DelayGate::INITIAL);
    let show_handle = StoredValue::new_local(None::<TimeoutHandle>);
    let floor_handle = StoredValue::new_local(None::<TimeoutHandle>);

    // Mirror the latest progress value into the gate.
    Effect::new(move |_| {
        let in_flight = watch.get();
        if let Some(emission) = gate.try_update_value(|g| g.progress_changed(in_flight)).flatten() {
            output.set(emission);
        }
    });

    // Mirror the completion signal into the gate.
    Effect::new(move |_| {
        let done = complete.get();
        if let Some(emission) = gate.try_update_value(|g| g.complete_changed(done)).flatten() {
            output.set(emission);
        }
    });

    // Arm the two one-shot deadlines on the first client-side run.
    Effect::new(move |armed: Option<()>| {
        if armed.is_some() {
            return;
        }
        if let Ok(handle) = set_timeout_with_handle(
            move || {
                if let Some(emission) = gate.try_update_value(DelayGate::show_deadline).flatten() {
                    output.set(emission);
                }
            },
            after,
        ) {
            show_handle.set_value(Some(handle));
        }
        if let Ok(handle) = set_timeout_with_handle(
            move || {
                if let Some(emission) = gate.try_update_value(DelayGate::floor_deadline).flatten() {
                    output.set(emission);
                }
            },
            after + at_least,
        ) {
            floor_handle.set_value(Some(handle));
        }
    });

    on_cleanup(move || {
        if let Some(handle) = show_handle.try_get_value().flatten() {
            handle.clear();
        }
        if let Some(handle) = floor_handle.try_get_value().flatten() {
            handle.clear();
        }
    });

    output.into()
}

/// App-wide loading state.
///
/// Owns the shared `request_complete` latch that pages flip around their
/// fetches. [`LoadingService::with_delay`] wires that latch into the delay
/// policy; every indicator built through it observes the same latch, so two
/// concurrent indicators watching different operations will see each other's
/// completions. Callers tracking independent operations should pass their
/// own completion signal to the free [`with_delay`] instead.
#[derive(Debug, Clone, Copy)]
pub struct LoadingService {
    pub request_complete: RwSignal<bool>,
}

impl LoadingService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_complete: RwSignal::new(false),
        }
    }

    /// Derives a spinner visibility signal gated on the shared latch.
    #[must_use]
    pub fn with_delay(&self, watch: Signal<bool>, after: Duration, at_least: Duration) -> Signal<bool> {
        with_delay(watch, self.request_complete.into(), after, at_least)
    }
}

impl Default for LoadingService {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod service_tests {
    use super::*;

    #[test]
    fn test_with_delay_signature() {
        // Wiring the gate into the reactive graph needs a browser runtime;
        // following Leptos practice the policy is tested separately and the
        // wiring is checked by signature.
        let _: fn(Signal<bool>, Signal<bool>, Duration, Duration) -> Signal<bool> = with_delay;
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(SHOW_AFTER, Duration::from_millis(650));
        assert_eq!(SHOW_AT_LEAST, Duration::from_millis(1000));
    }
}
