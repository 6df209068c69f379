//! Crunch family: reps from how far the head rises above the hips.

use crate::exercise::ExerciseFamily;
use crate::geometry::angle_at_vertex;
use crate::issue::{FormCheck, FormIssue};
use crate::landmarks::PoseLandmark::*;
use crate::rep_counter::{advance, SignalKind};
use crate::state::ExerciseState;

use super::{log_rep, Frame};

pub(super) fn evaluate(
    frame: &Frame<'_>,
    previous: &ExerciseState,
    issues: &mut Vec<FormIssue>,
) -> ExerciseState {
    let pose = &frame.pose;
    let at = frame.timestamp;

    // Positive while the nose is above (smaller y than) the hips.
    let rise = pose.center(LeftHip, RightHip).y - pose.get(Nose).y;

    let step = advance(
        previous,
        rise,
        SignalKind::Offset,
        &frame.thresholds.crunch,
        at,
    );
    log_rep(ExerciseFamily::Crunch, &step, rise);

    let neck_angle = angle_at_vertex(
        pose.point(Nose),
        pose.point(LeftShoulder),
        pose.point(LeftHip),
    );
    if neck_angle < frame.thresholds.posture.neck_angle {
        issues.push(FormCheck::NeckPulling.at(at));
    }

    step.state
}
