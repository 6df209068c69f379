//! Pose landmark input model.
//!
//! The pose estimator emits the 33-point MediaPipe Pose topology. Only the
//! slots listed in [`PoseLandmark`] are read by the analyzer; their indices
//! are fixed and never renumbered.

use serde::{Deserialize, Serialize};

use crate::geometry::{midpoint, Point};

/// A single tracked body-joint position in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub const fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Projection onto the image plane.
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Landmarks without a confidence score are assumed visible.
    pub fn is_visible(&self, min_visibility: f64) -> bool {
        self.visibility.map_or(true, |v| v >= min_visibility)
    }
}

// ---------------------------------------------------------------------------
// Anatomical slots
// ---------------------------------------------------------------------------

/// Anatomical slots read by the analyzer, with their MediaPipe indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
}

impl PoseLandmark {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Minimum landmark array length: every slot up to the right ankle must exist.
pub const REQUIRED_LANDMARK_COUNT: usize = PoseLandmark::RightAnkle.index() + 1;

// ---------------------------------------------------------------------------
// Pose view
// ---------------------------------------------------------------------------

/// Checked view over one frame's landmark array.
///
/// Construction guarantees that every [`PoseLandmark`] slot is in bounds,
/// so slot lookups cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct Pose<'a> {
    landmarks: &'a [Landmark],
}

impl<'a> Pose<'a> {
    /// Returns `None` when the array is too short to cover every slot.
    pub fn new(landmarks: &'a [Landmark]) -> Option<Self> {
        (landmarks.len() >= REQUIRED_LANDMARK_COUNT).then_some(Self { landmarks })
    }

    pub fn get(&self, slot: PoseLandmark) -> &'a Landmark {
        &self.landmarks[slot.index()]
    }

    pub fn point(&self, slot: PoseLandmark) -> Point {
        self.get(slot).point()
    }

    /// Midpoint of a left/right pair.
    pub fn center(&self, left: PoseLandmark, right: PoseLandmark) -> Point {
        midpoint(self.point(left), self.point(right))
    }

    /// `true` when every listed slot meets the visibility floor.
    pub fn all_visible(&self, slots: &[PoseLandmark], min_visibility: f64) -> bool {
        slots
            .iter()
            .all(|&slot| self.get(slot).is_visible(min_visibility))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
