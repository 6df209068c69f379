#![allow(dead_code)]

use formcheck_core::{analyze, ExerciseFormAnalysis, ExerciseState, Landmark, PoseLandmark};

pub const FRAME_LEN: usize = 33;

/// Frame spacing used by the scenarios (10 fps).
pub const FRAME_MS: i64 = 100;

/// First frame timestamp. Non-zero so a rep on the first frame is distinguishable
/// from "no rep yet".
pub const START_MS: i64 = 1_000;

fn set(frame: &mut [Landmark], slot: PoseLandmark, x: f64, y: f64) {
    frame[slot.index()] = Landmark::new(x, y);
}

/// Build a frame whose average knee angle is exactly `knee_angle`.
///
/// Shins are vertical, shoulders sit directly above the hips and both sides
/// are mirrored in height, so no posture check fires except those that
/// depend on depth.
pub fn squat_frame(knee_angle: f64) -> Vec<Landmark> {
    use PoseLandmark::*;

    let mut frame = vec![Landmark::new(0.5, 0.5); FRAME_LEN];
    let theta = knee_angle.to_radians();

    for (knee_x, hip, knee, ankle, shoulder) in [
        (0.4, LeftHip, LeftKnee, LeftAnkle, LeftShoulder),
        (0.6, RightHip, RightKnee, RightAnkle, RightShoulder),
    ] {
        let hip_x = knee_x + 0.2 * theta.sin();
        let hip_y = 0.7 + 0.2 * theta.cos();
        set(&mut frame, ankle, knee_x, 0.9);
        set(&mut frame, knee, knee_x, 0.7);
        set(&mut frame, hip, hip_x, hip_y);
        set(&mut frame, shoulder, hip_x, hip_y - 0.25);
    }
    frame
}

/// Feed knee angles through the squat analyzer, `FRAME_MS` apart.
pub fn run_squat(angles: &[f64]) -> Vec<ExerciseFormAnalysis> {
    run_squat_spaced(angles, FRAME_MS)
}

pub fn run_squat_spaced(angles: &[f64], step_ms: i64) -> Vec<ExerciseFormAnalysis> {
    let mut state: Option<ExerciseState> = None;
    angles
        .iter()
        .enumerate()
        .map(|(i, &angle)| {
            let result = analyze(
                "squats",
                &squat_frame(angle),
                START_MS + i as i64 * step_ms,
                state.as_ref(),
            );
            state = Some(result.exercise_state);
            result
        })
        .collect()
}
