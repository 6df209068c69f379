//! Curl family: elbow-angle reps with an elbow drift check.

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

    let left_drift = (pose.get(LeftElbow).x - pose.get(LeftShoulder).x).abs();
    let right_drift = (pose.get(RightElbow).x - pose.get(RightShoulder).x).abs();
    if left_drift.max(right_drift) > frame.thresholds.posture.elbow_drift {
        issues.push(FormCheck::ElbowDrift.at(at));
    }

    let left = angle_at_vertex(
        pose.point(LeftShoulder),
        pose.point(LeftElbow),
        pose.point(LeftWrist),
    );
    let right = angle_at_vertex(
        pose.point(RightShoulder),
        pose.point(RightElbow),
        pose.point(RightWrist),
    );
    let angle = (left + right) / 2.0;

    let step = advance(
        previous,
        angle,
        SignalKind::JointAngle,
        &frame.thresholds.curl,
        at,
    );
    log_rep(ExerciseFamily::Curl, &step, angle);
    step.state
}
