//! Plank-line family (push-ups, pushdowns): level checks plus head alignment.

use crate::issue::{FormCheck, FormIssue};
use crate::landmarks::PoseLandmark::*;

use super::{posture, Frame};

pub(super) fn evaluate(frame: &Frame<'_>, issues: &mut Vec<FormIssue>) {
    posture::check_level(frame, issues);

    let pose = &frame.pose;
    let shoulder_y = pose.center(LeftShoulder, RightShoulder).y;
    if (pose.get(Nose).y - shoulder_y).abs() > frame.thresholds.posture.body_line {
        issues.push(FormCheck::BodyLineBroken.at(frame.timestamp));
    }
}
