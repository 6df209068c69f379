//! Hysteresis state machine that counts repetitions from a scalar signal.
//!
//! Pure function of (previous state, signal, thresholds, time). The same
//! machine serves every rep-counting family; polarity in
//! [`RepThresholds`] decides whether the signal falls or rises into the
//! down phase.

use crate::state::{ExerciseState, RepState};
use crate::thresholds::RepThresholds;
use crate::types::EpochMillis;

/// How the signal relates to the extrema fields of [`ExerciseState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Joint angle in degrees; folded into `lowest_angle` / `highest_angle`.
    JointAngle,
    /// Any other measure; extrema fields are left alone.
    Offset,
}

/// Result of feeding one sample to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepStep {
    pub state: ExerciseState,
    pub rep_counted: bool,
}

/// Advance the rep state machine by one sample.
///
/// A rep is counted when the confirmed-up condition is met after having
/// been down, and only if strictly more than `min_rep_interval_ms` has
/// elapsed since the previous counted rep. `rep_count` never decreases.
pub fn advance(
    previous: &ExerciseState,
    value: f64,
    kind: SignalKind,
    thresholds: &RepThresholds,
    now: EpochMillis,
) -> RepStep {
    let mut state = *previous;
    let tracks_angle = kind == SignalKind::JointAngle;

    if tracks_angle {
        state.lowest_angle = state.lowest_angle.min(value);
        state.highest_angle = state.highest_angle.max(value);
    }

    let debounced = previous
        .millis_since_last_rep(now)
        .map_or(true, |elapsed| elapsed > thresholds.min_rep_interval_ms);

    let mut rep_counted = false;

    match previous.rep_state {
        RepState::Up => {
            if thresholds.is_down(value) {
                enter_down(&mut state, value, tracks_angle);
            } else if thresholds.has_left_up(value) {
                state.rep_state = RepState::TransitioningDown;
            }
        }
        RepState::TransitioningDown => {
            if thresholds.is_down(value) {
                enter_down(&mut state, value, tracks_angle);
            } else if thresholds.is_up(value) {
                // Turned back before reaching the bottom: false start.
                state.rep_state = RepState::Up;
            }
        }
        RepState::Down => {
            if thresholds.is_up(value) && debounced {
                count_rep(&mut state, value, tracks_angle, now);
                rep_counted = true;
            } else if thresholds.has_left_down(value) {
                state.rep_state = RepState::TransitioningUp;
            }
        }
        RepState::TransitioningUp => {
            if thresholds.is_up(value) && debounced {
                count_rep(&mut state, value, tracks_angle, now);
                rep_counted = true;
            } else if thresholds.is_down(value) {
                state.rep_state = RepState::Down;
            }
        }
    }

    RepStep { state, rep_counted }
}

fn enter_down(state: &mut ExerciseState, value: f64, tracks_angle: bool) {
    state.rep_state = RepState::Down;
    if tracks_angle {
        state.lowest_angle = value;
    }
}

fn count_rep(state: &mut ExerciseState, value: f64, tracks_angle: bool, now: EpochMillis) {
    state.rep_state = RepState::Up;
    state.rep_count = state.rep_count.saturating_add(1);
    state.last_rep_time = now;
    if tracks_angle {
        state.highest_angle = value;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::{CRUNCH_REP_THRESHOLDS, CURL_REP_THRESHOLDS, SQUAT_REP_THRESHOLDS};

    /// Feed `values` starting at `start`, `step_ms` apart; return every state.
    fn run(
        thresholds: &RepThresholds,
        kind: SignalKind,
        values: &[f64],
        start: EpochMillis,
        step_ms: i64,
    ) -> Vec<ExerciseState> {
        let mut state = ExerciseState::default();
        let mut out = Vec::with_capacity(values.len());
        for (i, &v) in values.iter().enumerate() {
            state = advance(&state, v, kind, thresholds, start + i as i64 * step_ms).state;
            out.push(state);
        }
        out
    }

    fn squat(values: &[f64]) -> Vec<ExerciseState> {
        run(&SQUAT_REP_THRESHOLDS, SignalKind::JointAngle, values, 1_000, 100)
    }

    // -- squat transitions ----------------------------------------------------

    #[test]
    fn full_cycle_counts_one_rep() {
        let states = squat(&[170.0, 140.0, 100.0, 130.0, 165.0]);
        let kinds: Vec<_> = states.iter().map(|s| s.rep_state).collect();
        assert_eq!(
            kinds,
            vec![
                RepState::Up,
                RepState::TransitioningDown,
                RepState::Down,
                RepState::TransitioningUp,
                RepState::Up,
            ]
        );
        assert_eq!(states.last().unwrap().rep_count, 1);
        assert_eq!(states.last().unwrap().last_rep_time, 1_400);
    }

    #[test]
    fn direct_up_to_down_and_back() {
        let states = squat(&[100.0, 160.0]);
        assert_eq!(states[0].rep_state, RepState::Down);
        assert_eq!(states[1].rep_state, RepState::Up);
        assert_eq!(states[1].rep_count, 1);
    }

    #[test]
    fn false_start_reverts_to_up() {
        let states = squat(&[170.0, 130.0, 155.0]);
        assert_eq!(states[1].rep_state, RepState::TransitioningDown);
        assert_eq!(states[2].rep_state, RepState::Up);
        assert_eq!(states[2].rep_count, 0);
    }

    #[test]
    fn relapse_from_transitioning_up_returns_down() {
        let states = squat(&[100.0, 130.0, 105.0]);
        assert_eq!(states[1].rep_state, RepState::TransitioningUp);
        assert_eq!(states[2].rep_state, RepState::Down);
    }

    #[test]
    fn up_edge_is_not_a_departure() {
        let states = squat(&[150.0, 150.0]);
        assert!(states.iter().all(|s| s.rep_state == RepState::Up));
    }

    // -- extrema --------------------------------------------------------------

    #[test]
    fn lowest_resets_on_entering_down_then_tracks_minimum() {
        let states = squat(&[170.0, 105.0, 95.0, 99.0]);
        assert_eq!(states[1].lowest_angle, 105.0);
        assert_eq!(states[2].lowest_angle, 95.0);
        assert_eq!(states[3].lowest_angle, 95.0);
    }

    #[test]
    fn highest_resets_on_rep() {
        let states = squat(&[175.0, 100.0, 160.0]);
        assert_eq!(states[0].highest_angle, 175.0);
        assert_eq!(states[2].highest_angle, 160.0);
    }

    #[test]
    fn offset_signal_leaves_extrema_alone() {
        let states = run(
            &CRUNCH_REP_THRESHOLDS,
            SignalKind::Offset,
            &[0.0, 0.2, 0.0],
            1_000,
            100,
        );
        for s in &states {
            assert_eq!(s.lowest_angle, 180.0);
            assert_eq!(s.highest_angle, 0.0);
        }
        assert_eq!(states[2].rep_count, 1);
    }

    // -- debounce -------------------------------------------------------------

    #[test]
    fn second_rep_inside_window_is_held() {
        // Two cycles 200ms apart with a 500ms window.
        let states = squat(&[100.0, 160.0, 100.0, 160.0]);
        assert_eq!(states[1].rep_count, 1);
        assert_eq!(states[3].rep_count, 1);
        assert_eq!(states[3].rep_state, RepState::TransitioningUp);
    }

    #[test]
    fn held_rep_counts_once_window_passes() {
        let t = SQUAT_REP_THRESHOLDS;
        let mut s = ExerciseState::default();
        for (value, at) in [(100.0, 1_000), (160.0, 1_100), (100.0, 1_200), (160.0, 1_300)] {
            s = advance(&s, value, SignalKind::JointAngle, &t, at).state;
        }
        assert_eq!(s.rep_count, 1);

        // Exactly at the window edge is still too soon.
        s = advance(&s, 160.0, SignalKind::JointAngle, &t, 1_600).state;
        assert_eq!(s.rep_count, 1);

        let step = advance(&s, 160.0, SignalKind::JointAngle, &t, 1_601);
        assert!(step.rep_counted);
        assert_eq!(step.state.rep_count, 2);
    }

    // -- curl / crunch --------------------------------------------------------

    #[test]
    fn curl_uses_its_wider_band() {
        let states = run(
            &CURL_REP_THRESHOLDS,
            SignalKind::JointAngle,
            &[160.0, 110.0, 60.0, 110.0, 125.0],
            1_000,
            200,
        );
        assert_eq!(states[1].rep_state, RepState::TransitioningDown);
        assert_eq!(states[2].rep_state, RepState::Down);
        assert_eq!(states[3].rep_state, RepState::TransitioningUp);
        assert_eq!(states[4].rep_state, RepState::Up);
        assert_eq!(states[4].rep_count, 1);
    }

    #[test]
    fn crunch_rises_into_down() {
        let states = run(
            &CRUNCH_REP_THRESHOLDS,
            SignalKind::Offset,
            &[0.02, 0.1, 0.2, 0.1, 0.02],
            1_000,
            200,
        );
        let kinds: Vec<_> = states.iter().map(|s| s.rep_state).collect();
        assert_eq!(
            kinds,
            vec![
                RepState::Up,
                RepState::TransitioningDown,
                RepState::Down,
                RepState::TransitioningUp,
                RepState::Up,
            ]
        );
        assert_eq!(states[4].rep_count, 1);
    }

    // -- invariants -----------------------------------------------------------

    #[test]
    fn rep_count_never_decreases() {
        let values = [
            170.0, 120.0, 90.0, 130.0, 100.0, 155.0, 140.0, 170.0, 80.0, 175.0, 109.0, 151.0,
        ];
        let states = squat(&values);
        for pair in states.windows(2) {
            assert!(pair[1].rep_count >= pair[0].rep_count);
        }
    }

    #[test]
    fn static_input_is_idempotent() {
        for value in [175.0, 130.0, 90.0] {
            let t = SQUAT_REP_THRESHOLDS;
            let first = advance(&ExerciseState::default(), value, SignalKind::JointAngle, &t, 1_000)
                .state;
            let mut s = first;
            for _ in 0..20 {
                s = advance(&s, value, SignalKind::JointAngle, &t, 1_000).state;
                assert_eq!(s.rep_state, first.rep_state);
                assert_eq!(s.rep_count, 0);
            }
        }
    }
}
