//! Checks shared across exercise families.

use crate::issue::{FormCheck, FormIssue};
use crate::landmarks::PoseLandmark;

use super::Frame;

/// Flag uneven shoulders and uneven hips.
pub(super) fn check_level(frame: &Frame<'_>, issues: &mut Vec<FormIssue>) {
    let pose = &frame.pose;
    let tolerance = frame.thresholds.posture.level_tolerance;

    let shoulder_gap =
        (pose.get(PoseLandmark::LeftShoulder).y - pose.get(PoseLandmark::RightShoulder).y).abs();
    if shoulder_gap > tolerance {
        issues.push(FormCheck::ShouldersUneven.at(frame.timestamp));
    }

    let hip_gap = (pose.get(PoseLandmark::LeftHip).y - pose.get(PoseLandmark::RightHip).y).abs();
    if hip_gap > tolerance {
        issues.push(FormCheck::HipsUneven.at(frame.timestamp));
    }
}
