//! Planar geometry over normalized image coordinates.
//!
//! Everything here works in the x/y plane only; depth and confidence are
//! dropped before a landmark reaches these functions (see
//! [`Landmark::point`](crate::landmarks::Landmark::point)).

use serde::{Deserialize, Serialize};

/// Angle reported when a vertex coincides with one of its neighbours.
pub const DEGENERATE_ANGLE_DEGREES: f64 = 180.0;

/// Segments shorter than this are treated as zero-length.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// A point in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt()
}

/// Point halfway between `p1` and `p2`.
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

/// Angle at `p2` formed by the rays towards `p1` and `p3`, in degrees.
///
/// Uses the law of cosines. The cosine is clamped to `[-1, 1]` so that
/// floating-point overshoot on near-colinear input cannot produce `NaN`.
/// When `p2` coincides with `p1` or `p3` the angle is undefined and
/// [`DEGENERATE_ANGLE_DEGREES`] is returned.
pub fn angle_at_vertex(p1: Point, p2: Point, p3: Point) -> f64 {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p1, p3);

    if a < MIN_SEGMENT_LENGTH || b < MIN_SEGMENT_LENGTH {
        return DEGENERATE_ANGLE_DEGREES;
    }

    let cosine = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
