//! Squat family: knee-angle reps with torso, knee and depth checks.

use crate::exercise::ExerciseFamily;
use crate::geometry::angle_at_vertex;
use crate::issue::{FormCheck, FormIssue};
use crate::landmarks::PoseLandmark::*;
use crate::rep_counter::{advance, SignalKind};
use crate::state::{ExerciseState, RepState};

use super::{log_rep, posture, Frame};

/// Mean knee angle (hip-knee-ankle) over both legs.
pub(super) fn knee_angle(frame: &Frame<'_>) -> f64 {
    let pose = &frame.pose;
    let left = angle_at_vertex(
        pose.point(LeftHip),
        pose.point(LeftKnee),
        pose.point(LeftAnkle),
    );
    let right = angle_at_vertex(
        pose.point(RightHip),
        pose.point(RightKnee),
        pose.point(RightAnkle),
    );
    (left + right) / 2.0
}

pub(super) fn evaluate(
    frame: &Frame<'_>,
    previous: &ExerciseState,
    issues: &mut Vec<FormIssue>,
) -> ExerciseState {
    let pose = &frame.pose;
    let posture_limits = &frame.thresholds.posture;
    let rep_limits = &frame.thresholds.squat;
    let at = frame.timestamp;

    let angle = knee_angle(frame);
    let step = advance(previous, angle, SignalKind::JointAngle, rep_limits, at);
    log_rep(ExerciseFamily::Squat, &step, angle);
    let state = step.state;

    posture::check_level(frame, issues);

    // Only leaning forward (shoulders ahead of hips) is flagged.
    let shoulders = pose.center(LeftShoulder, RightShoulder);
    let hips = pose.center(LeftHip, RightHip);
    if shoulders.x - hips.x > posture_limits.forward_lean {
        issues.push(FormCheck::ForwardLean.at(at));
    }

    let left_knee_offset = (pose.get(LeftKnee).x - pose.get(LeftAnkle).x).abs();
    let right_knee_offset = (pose.get(RightKnee).x - pose.get(RightAnkle).x).abs();
    let knee_offset = left_knee_offset.max(right_knee_offset);

    if matches!(state.rep_state, RepState::Down | RepState::TransitioningUp)
        && knee_offset > posture_limits.knee_over_toe
    {
        issues.push(FormCheck::KneesPastToes.at(at));
    }

    let knees = pose.center(LeftKnee, RightKnee);
    let spine_angle = angle_at_vertex(shoulders, hips, knees);
    if state.rep_state == RepState::Down && spine_angle < posture_limits.spine_rounding_angle {
        issues.push(FormCheck::BackRounding.at(at));
    }

    if angle < posture_limits.valgus_depth_angle && knee_offset > posture_limits.valgus_offset {
        issues.push(FormCheck::KneeValgus.at(at));
    }

    if let Some(depth) = rep_limits.depth {
        if state.rep_state == RepState::Down && state.lowest_angle > depth {
            issues.push(FormCheck::ShallowDepth.at(at));
        }
    }

    state
}
