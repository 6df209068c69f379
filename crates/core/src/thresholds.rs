//! Exercise-tuned thresholds, kept as data rather than inline literals.
//!
//! Rep thresholds are looked up per [`ExerciseFamily`]; posture thresholds
//! are shared by every family that runs the corresponding check.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::exercise::ExerciseFamily;

// ---------------------------------------------------------------------------
// Polarity
// ---------------------------------------------------------------------------

/// Which way the rep signal moves when entering the down phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Joint angles: the signal shrinks as the joint flexes.
    Falling,
    /// Distances that grow as the body curls (crunch rise).
    Rising,
}

// ---------------------------------------------------------------------------
// RepThresholds
// ---------------------------------------------------------------------------

/// Hysteresis band and debounce for one rep-counting family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepThresholds {
    /// Signal must pass this to confirm the down phase.
    pub down: f64,
    /// Signal must pass this (back the other way) to confirm the up phase.
    pub up: f64,
    /// Minimum time between counted reps.
    pub min_rep_interval_ms: i64,
    /// Lowest angle a full-depth rep must reach, if depth is assessed.
    pub depth: Option<f64>,
    pub polarity: Polarity,
}

impl RepThresholds {
    /// `value` is inside the confirmed-down zone.
    pub fn is_down(&self, value: f64) -> bool {
        match self.polarity {
            Polarity::Falling => value < self.down,
            Polarity::Rising => value > self.down,
        }
    }

    /// `value` is inside the confirmed-up zone.
    pub fn is_up(&self, value: f64) -> bool {
        match self.polarity {
            Polarity::Falling => value > self.up,
            Polarity::Rising => value < self.up,
        }
    }

    /// `value` has left the up zone (the up edge itself stays up).
    pub fn has_left_up(&self, value: f64) -> bool {
        match self.polarity {
            Polarity::Falling => value < self.up,
            Polarity::Rising => value > self.up,
        }
    }

    /// `value` has climbed out of the down zone.
    pub fn has_left_down(&self, value: f64) -> bool {
        match self.polarity {
            Polarity::Falling => value > self.down,
            Polarity::Rising => value < self.down,
        }
    }

    /// Check band ordering and ranges.
    pub fn validate(&self, family: &str) -> Result<(), CoreError> {
        let ordered = match self.polarity {
            Polarity::Falling => self.down < self.up,
            Polarity::Rising => self.down > self.up,
        };
        if !ordered {
            return Err(CoreError::Validation(format!(
                "{family}: down threshold ({}) must be stricter than up threshold ({}) for {:?} polarity",
                self.down, self.up, self.polarity
            )));
        }
        if self.polarity == Polarity::Falling && !(0.0..=180.0).contains(&self.up) {
            return Err(CoreError::Validation(format!(
                "{family}: angle thresholds must be within 0..=180 degrees, got up = {}",
                self.up
            )));
        }
        if self.min_rep_interval_ms < 0 {
            return Err(CoreError::Validation(format!(
                "{family}: min_rep_interval_ms must be >= 0, got {}",
                self.min_rep_interval_ms
            )));
        }
        if let Some(depth) = self.depth {
            if !(0.0..=180.0).contains(&depth) {
                return Err(CoreError::Validation(format!(
                    "{family}: depth threshold must be within 0..=180 degrees, got {depth}"
                )));
            }
        }
        Ok(())
    }
}

/// Squat knee angle: below 110° is down, above 150° is up.
pub const SQUAT_REP_THRESHOLDS: RepThresholds = RepThresholds {
    down: 110.0,
    up: 150.0,
    min_rep_interval_ms: 500,
    depth: Some(100.0),
    polarity: Polarity::Falling,
};

/// Curl elbow angle. Deliberately wide so partial curls still register.
pub const CURL_REP_THRESHOLDS: RepThresholds = RepThresholds {
    down: 100.0,
    up: 120.0,
    min_rep_interval_ms: 300,
    depth: None,
    polarity: Polarity::Falling,
};

/// Crunch rise (hip y minus nose y): above 0.15 is curled, below 0.05 is flat.
pub const CRUNCH_REP_THRESHOLDS: RepThresholds = RepThresholds {
    down: 0.15,
    up: 0.05,
    min_rep_interval_ms: 400,
    depth: None,
    polarity: Polarity::Rising,
};

// ---------------------------------------------------------------------------
// PostureThresholds
// ---------------------------------------------------------------------------

/// Limits for the posture checks, in normalized units unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostureThresholds {
    /// Max vertical gap between left and right shoulder (or hip).
    pub level_tolerance: f64,
    /// Max shoulder-ahead-of-hip horizontal offset.
    pub forward_lean: f64,
    /// Max knee-to-ankle horizontal offset while down.
    pub knee_over_toe: f64,
    /// Shoulder-hip-knee angle (degrees) below which the back is rounding.
    pub spine_rounding_angle: f64,
    /// Knee angle (degrees) below which valgus is assessed.
    pub valgus_depth_angle: f64,
    /// Max knee-to-ankle horizontal offset in a deep squat.
    pub valgus_offset: f64,
    /// Max elbow-to-shoulder horizontal offset during curls.
    pub elbow_drift: f64,
    /// Max vertical gap between nose and shoulder line.
    pub body_line: f64,
    /// Nose-shoulder-hip angle (degrees) below which the neck is pulling.
    pub neck_angle: f64,
}

pub const DEFAULT_POSTURE_THRESHOLDS: PostureThresholds = PostureThresholds {
    level_tolerance: 0.05,
    forward_lean: 0.15,
    knee_over_toe: 0.12,
    spine_rounding_angle: 70.0,
    valgus_depth_angle: 100.0,
    valgus_offset: 0.1,
    elbow_drift: 0.2,
    body_line: 0.2,
    neck_angle: 120.0,
};

// ---------------------------------------------------------------------------
// ThresholdTable
// ---------------------------------------------------------------------------

/// All tunable thresholds, keyed by family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub squat: RepThresholds,
    pub curl: RepThresholds,
    pub crunch: RepThresholds,
    pub posture: PostureThresholds,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            squat: SQUAT_REP_THRESHOLDS,
            curl: CURL_REP_THRESHOLDS,
            crunch: CRUNCH_REP_THRESHOLDS,
            posture: DEFAULT_POSTURE_THRESHOLDS,
        }
    }
}

impl ThresholdTable {
    /// Rep thresholds for a family, or `None` if it has no rep signal.
    pub fn rep(&self, family: ExerciseFamily) -> Option<&RepThresholds> {
        match family {
            ExerciseFamily::Squat => Some(&self.squat),
            ExerciseFamily::Curl => Some(&self.curl),
            ExerciseFamily::Crunch => Some(&self.crunch),
            ExerciseFamily::PlankLine | ExerciseFamily::Generic => None,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.squat.validate("squat")?;
        self.curl.validate("curl")?;
        self.crunch.validate("crunch")?;

        let p = &self.posture;
        for (name, value) in [
            ("level_tolerance", p.level_tolerance),
            ("forward_lean", p.forward_lean),
            ("knee_over_toe", p.knee_over_toe),
            ("valgus_offset", p.valgus_offset),
            ("elbow_drift", p.elbow_drift),
            ("body_line", p.body_line),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::Validation(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("spine_rounding_angle", p.spine_rounding_angle),
            ("valgus_depth_angle", p.valgus_depth_angle),
            ("neck_angle", p.neck_angle),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(CoreError::Validation(format!(
                    "{name} must be between 0 and 180 degrees, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
