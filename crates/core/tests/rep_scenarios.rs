//! End-to-end rep counting and form scenarios driven through the public API.

mod common;

use common::{run_squat, run_squat_spaced, squat_frame, START_MS};
use formcheck_core::{
    analyze, ExerciseState, FormCheck, IssueType, Landmark, RepState, Severity,
};

// ---------------------------------------------------------------------------
// Scenario: one full squat
// ---------------------------------------------------------------------------

#[test]
fn full_squat_counts_one_rep() {
    let results = run_squat(&[170.0, 150.0, 120.0, 95.0, 90.0, 120.0, 150.0, 170.0]);
    let last = results.last().unwrap();

    assert_eq!(last.rep_count, 1);
    assert_eq!(last.exercise_state.rep_state, RepState::Up);
    assert!(results[..6].iter().all(|r| r.rep_count == 0));
    assert!(results.iter().all(|r| r.is_proper_form));
}

#[test]
fn full_squat_tracks_bottom_of_rep() {
    let results = run_squat(&[170.0, 120.0, 95.0, 90.0, 120.0]);
    let lowest = results.last().unwrap().exercise_state.lowest_angle;
    assert!((lowest - 90.0).abs() < 1e-6, "lowest = {lowest}");
}

// ---------------------------------------------------------------------------
// Scenario: partial rep never reaches the bottom
// ---------------------------------------------------------------------------

#[test]
fn partial_rep_is_not_counted() {
    let results = run_squat(&[170.0, 140.0, 160.0, 170.0]);

    assert!(results.iter().all(|r| r.rep_count == 0));
    assert_eq!(results[1].exercise_state.rep_state, RepState::TransitioningDown);
    assert_eq!(results.last().unwrap().exercise_state.rep_state, RepState::Up);
}

// ---------------------------------------------------------------------------
// Scenario: shallow squat
// ---------------------------------------------------------------------------

#[test]
fn shallow_squat_flags_range_of_motion_but_still_counts() {
    let results = run_squat(&[170.0, 130.0, 105.0, 105.0, 130.0, 160.0]);

    for down in &results[2..4] {
        assert_eq!(down.exercise_state.rep_state, RepState::Down);
        let issue = down
            .issues
            .iter()
            .find(|i| i.issue_type == IssueType::RangeOfMotion)
            .expect("range-of-motion issue while down");
        assert_eq!(issue.severity, Severity::Low);
        assert_eq!(issue.check, FormCheck::ShallowDepth);
    }

    // Leaving the bottom clears the depth warning.
    assert!(results[4].issues.is_empty());
    assert_eq!(results.last().unwrap().rep_count, 1);
}

// ---------------------------------------------------------------------------
// Hysteresis and debounce
// ---------------------------------------------------------------------------

#[test]
fn jitter_around_up_threshold_never_counts() {
    let angles: Vec<f64> = (0..40)
        .map(|i| if i % 2 == 0 { 152.0 } else { 148.0 })
        .collect();
    let results = run_squat(&angles);

    for r in &results {
        assert_eq!(r.rep_count, 0);
        assert!(matches!(
            r.exercise_state.rep_state,
            RepState::Up | RepState::TransitioningDown
        ));
    }
}

#[test]
fn jitter_around_down_threshold_never_counts() {
    let mut angles = vec![170.0];
    angles.extend((0..40).map(|i| if i % 2 == 0 { 108.0 } else { 112.0 }));
    let results = run_squat(&angles);

    assert!(results.iter().all(|r| r.rep_count == 0));
    assert!(results[1..].iter().all(|r| matches!(
        r.exercise_state.rep_state,
        RepState::Down | RepState::TransitioningUp
    )));
}

#[test]
fn second_rep_inside_debounce_window_is_not_counted() {
    // Two complete cycles with all frames 50ms apart: the second completes
    // 200ms after the first, inside the 500ms window.
    let results = run_squat_spaced(&[170.0, 95.0, 170.0, 95.0, 170.0], 50);

    assert_eq!(results[2].rep_count, 1);
    assert_eq!(results[4].rep_count, 1);
    assert_eq!(results[4].exercise_state.last_rep_time, START_MS + 100);
}

#[test]
fn reps_outside_debounce_window_all_count() {
    let results = run_squat_spaced(&[170.0, 95.0, 170.0, 95.0, 170.0, 95.0, 170.0], 300);
    assert_eq!(results.last().unwrap().rep_count, 3);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn static_pose_is_idempotent() {
    for angle in [170.0, 130.0, 90.0] {
        let frame = squat_frame(angle);
        let first = analyze("squats", &frame, START_MS, None);
        let mut state = first.exercise_state;
        for _ in 0..25 {
            let next = analyze("squats", &frame, START_MS, Some(&state));
            assert_eq!(next.rep_count, 0);
            assert_eq!(next.exercise_state.rep_state, first.exercise_state.rep_state);
            state = next.exercise_state;
        }
    }
}

#[test]
fn rep_count_is_monotonic() {
    let angles = [
        170.0, 100.0, 165.0, 140.0, 90.0, 130.0, 105.0, 175.0, 95.0, 160.0, 100.0, 110.0,
        150.0, 151.0, 80.0, 179.0,
    ];
    let results = run_squat_spaced(&angles, 260);
    for pair in results.windows(2) {
        assert!(pair[1].rep_count >= pair[0].rep_count);
    }
}

#[test]
fn insufficient_landmarks_leave_state_untouched() {
    let previous = ExerciseState {
        rep_state: RepState::TransitioningUp,
        rep_count: 7,
        last_rep_time: 4_200,
        lowest_angle: 88.0,
        highest_angle: 171.0,
    };
    for landmarks in [Vec::new(), vec![Landmark::new(0.5, 0.5); 20]] {
        let result = analyze("squats", &landmarks, 5_000, Some(&previous));
        assert!(result.issues.is_empty());
        assert_eq!(result.exercise_state, previous);
        assert_eq!(result.rep_count, 7);
    }
}

#[test]
fn unknown_exercise_carries_rep_count() {
    let previous = ExerciseState {
        rep_count: 3,
        ..ExerciseState::default()
    };
    let result = analyze("battle-rope", &squat_frame(90.0), 5_000, Some(&previous));
    assert!(result.pose_detected);
    assert_eq!(result.exercise_state, previous);
}

#[test]
fn analysis_serializes_with_wire_names() {
    let results = run_squat(&[170.0, 105.0]);
    let json = serde_json::to_value(&results[1]).unwrap();

    assert_eq!(json["exercise_state"]["rep_state"], "DOWN");
    assert_eq!(json["issues"][0]["type"], "range-of-motion");
    assert_eq!(json["is_proper_form"], true);
}
