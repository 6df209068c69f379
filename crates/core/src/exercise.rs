//! Exercise catalog and behavior-family dispatch.
//!
//! Every exercise id maps onto one [`ExerciseFamily`]; the family decides
//! which rep signal and posture checks the analyzer runs. Ids the analyzer
//! has no tuning for fall back to [`ExerciseFamily::Generic`].

use serde::{Deserialize, Serialize};

use crate::landmarks::PoseLandmark;

// ---------------------------------------------------------------------------
// Exercise id constants
// ---------------------------------------------------------------------------

pub const EXERCISE_SQUATS: &str = "squats";
pub const EXERCISE_JUMPING_SQUATS: &str = "jumping-squats";
pub const EXERCISE_BICEP_CURL: &str = "bicep-curl";
pub const EXERCISE_HAMMER_CURL: &str = "hammer-curl";
pub const EXERCISE_PUSH_UPS: &str = "push-ups";
pub const EXERCISE_TRICEP_PUSHDOWNS: &str = "tricep-pushdowns";
pub const EXERCISE_CRUNCHES: &str = "crunches";

// ---------------------------------------------------------------------------
// ExerciseFamily
// ---------------------------------------------------------------------------

/// Analysis behavior shared by a group of exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseFamily {
    /// Knee-angle reps plus squat posture checks.
    Squat,
    /// Elbow-angle reps plus elbow drift check.
    Curl,
    /// Nose-to-hip rise reps plus neck strain check.
    Crunch,
    /// Common checks plus head/shoulder body line. No rep signal.
    PlankLine,
    /// Common checks only. No rep signal.
    Generic,
}

impl ExerciseFamily {
    /// Resolve an exercise id. Unknown ids map to `Generic`.
    pub fn from_id(exercise_id: &str) -> Self {
        match exercise_id {
            EXERCISE_SQUATS | EXERCISE_JUMPING_SQUATS => Self::Squat,
            EXERCISE_BICEP_CURL | EXERCISE_HAMMER_CURL => Self::Curl,
            EXERCISE_CRUNCHES => Self::Crunch,
            EXERCISE_PUSH_UPS | EXERCISE_TRICEP_PUSHDOWNS => Self::PlankLine,
            _ => Self::Generic,
        }
    }

    /// Whether the family drives the rep counter.
    pub fn counts_reps(self) -> bool {
        matches!(self, Self::Squat | Self::Curl | Self::Crunch)
    }

    /// Slots whose visibility gates analysis for this family.
    pub fn required_landmarks(self) -> &'static [PoseLandmark] {
        use PoseLandmark::*;
        match self {
            Self::Squat => &[
                LeftShoulder,
                RightShoulder,
                LeftHip,
                RightHip,
                LeftKnee,
                RightKnee,
                LeftAnkle,
                RightAnkle,
            ],
            Self::Curl => &[
                LeftShoulder,
                RightShoulder,
                LeftElbow,
                RightElbow,
                LeftWrist,
                RightWrist,
            ],
            Self::Crunch => &[Nose, LeftShoulder, LeftHip, RightHip],
            Self::PlankLine => &[Nose, LeftShoulder, RightShoulder, LeftHip, RightHip],
            Self::Generic => &[LeftShoulder, RightShoulder, LeftHip, RightHip],
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Muscle group an exercise is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyPart {
    Legs,
    ChestShoulderTriceps,
    FunctionalAbs,
    BackBiceps,
    Cardio,
}

impl BodyPart {
    pub fn label(self) -> &'static str {
        match self {
            Self::Legs => "Legs",
            Self::ChestShoulderTriceps => "Chest, Shoulder & Triceps",
            Self::FunctionalAbs => "Functional + Abs",
            Self::BackBiceps => "Back & Biceps",
            Self::Cardio => "Cardio",
        }
    }
}

/// A selectable exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub body_part: BodyPart,
}

impl Exercise {
    pub fn family(&self) -> ExerciseFamily {
        ExerciseFamily::from_id(self.id)
    }
}

const fn exercise(id: &'static str, name: &'static str, body_part: BodyPart) -> Exercise {
    Exercise {
        id,
        name,
        body_part,
    }
}

/// All exercises offered for tracking.
pub const EXERCISES: &[Exercise] = &[
    exercise(EXERCISE_SQUATS, "Squats", BodyPart::Legs),
    exercise("lunges", "Lunges", BodyPart::Legs),
    exercise("leg-presses", "Leg Presses", BodyPart::Legs),
    exercise("leg-curls", "Leg Curls", BodyPart::Legs),
    exercise("leg-extensions", "Leg Extensions", BodyPart::Legs),
    exercise("calf-raises", "Calf Raises", BodyPart::Legs),
    exercise("flat-dumbbell-press", "Flat Dumbbell Press", BodyPart::ChestShoulderTriceps),
    exercise("pec-dec-fly", "Pec Dec Fly", BodyPart::ChestShoulderTriceps),
    exercise("incline-dumbbell-press", "Incline Dumbbell Press", BodyPart::ChestShoulderTriceps),
    exercise("overhead-shoulder-press", "Overhead Shoulder Press", BodyPart::ChestShoulderTriceps),
    exercise("lateral-raises", "Lateral Raises", BodyPart::ChestShoulderTriceps),
    exercise("shrugs", "Shrugs", BodyPart::ChestShoulderTriceps),
    exercise(EXERCISE_TRICEP_PUSHDOWNS, "Tricep Pushdowns", BodyPart::ChestShoulderTriceps),
    exercise(EXERCISE_PUSH_UPS, "Push Ups", BodyPart::ChestShoulderTriceps),
    exercise("kneeup-running", "Knee Up Running", BodyPart::FunctionalAbs),
    exercise("mountain-climbers", "Mountain Climbers", BodyPart::FunctionalAbs),
    exercise("battle-rope", "Battle Rope", BodyPart::FunctionalAbs),
    exercise(EXERCISE_JUMPING_SQUATS, "Jumping Squats", BodyPart::FunctionalAbs),
    exercise("kettle-bell", "Kettle Bell Swings", BodyPart::FunctionalAbs),
    exercise("steppers", "Steppers", BodyPart::FunctionalAbs),
    exercise(EXERCISE_CRUNCHES, "Crunches", BodyPart::FunctionalAbs),
    exercise("lat-pull-down", "Lat Pull Down", BodyPart::BackBiceps),
    exercise("seated-row", "Seated Row", BodyPart::BackBiceps),
    exercise("close-grip-pull-down", "Close Grip Pull Down", BodyPart::BackBiceps),
    exercise("dumbbell-pullover", "Dumbbell Pullover", BodyPart::BackBiceps),
    exercise(EXERCISE_BICEP_CURL, "Bicep Curl", BodyPart::BackBiceps),
    exercise(EXERCISE_HAMMER_CURL, "Hammer Curl", BodyPart::BackBiceps),
    exercise("running", "Running", BodyPart::Cardio),
    exercise("cycling", "Cycling", BodyPart::Cardio),
];

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

pub fn exercises_by_body_part(body_part: BodyPart) -> impl Iterator<Item = &'static Exercise> {
    EXERCISES.iter().filter(move |e| e.body_part == body_part)
}

/// Display name for an id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    find_exercise(id).map_or(id, |e| e.name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
