//! Per-frame form analysis and rep counting.
//!
//! [`FormAnalyzer::analyze`] is pure with respect to its explicit state
//! argument: the caller threads the returned [`ExerciseState`] into the
//! next call. Frames that cannot be assessed (too few landmarks, or a
//! required joint below the visibility floor) return no issues and the
//! input state untouched.

mod crunch;
mod curl;
mod plank;
mod posture;
mod squat;

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::error::CoreError;
use crate::exercise::ExerciseFamily;
use crate::issue::{is_proper_form, FormIssue};
use crate::landmarks::{Landmark, Pose};
use crate::rep_counter::RepStep;
use crate::state::ExerciseState;
use crate::thresholds::ThresholdTable;
use crate::types::EpochMillis;

/// Result of analyzing one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFormAnalysis {
    pub issues: Vec<FormIssue>,
    pub rep_count: u32,
    /// `true` iff no issue in this frame is high severity.
    pub is_proper_form: bool,
    /// `false` when the frame was skipped for insufficient pose data.
    pub pose_detected: bool,
    pub exercise_state: ExerciseState,
}

impl ExerciseFormAnalysis {
    fn skipped(state: ExerciseState) -> Self {
        Self {
            issues: Vec::new(),
            rep_count: state.rep_count,
            is_proper_form: true,
            pose_detected: false,
            exercise_state: state,
        }
    }

    fn assessed(state: ExerciseState, issues: Vec<FormIssue>) -> Self {
        Self {
            is_proper_form: is_proper_form(&issues),
            rep_count: state.rep_count,
            pose_detected: true,
            exercise_state: state,
            issues,
        }
    }
}

/// Everything a family evaluator needs for one frame.
pub(crate) struct Frame<'a> {
    pub pose: Pose<'a>,
    pub timestamp: EpochMillis,
    pub thresholds: &'a ThresholdTable,
}

// ---------------------------------------------------------------------------
// FormAnalyzer
// ---------------------------------------------------------------------------

/// Stateless analyzer carrying validated thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormAnalyzer {
    config: AnalyzerConfig,
}

impl FormAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, CoreError> {
        config.ensure_valid()?;
        Ok(Self { config })
    }

    /// Build from `FORMCHECK_*` environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::new(AnalyzerConfig::from_env()?)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one frame for `exercise_id`.
    ///
    /// `previous` of `None` starts from [`ExerciseState::default`]. Unknown
    /// exercise ids get the generic posture checks and no rep counting.
    pub fn analyze(
        &self,
        exercise_id: &str,
        landmarks: &[Landmark],
        timestamp: EpochMillis,
        previous: Option<&ExerciseState>,
    ) -> ExerciseFormAnalysis {
        let previous = previous.copied().unwrap_or_default();
        let family = ExerciseFamily::from_id(exercise_id);

        let Some(pose) = Pose::new(landmarks) else {
            tracing::trace!(
                exercise_id,
                landmark_count = landmarks.len(),
                "Too few landmarks, frame skipped"
            );
            return ExerciseFormAnalysis::skipped(previous);
        };

        if !pose.all_visible(family.required_landmarks(), self.config.min_visibility) {
            tracing::trace!(exercise_id, ?family, "Required joints not visible, frame skipped");
            return ExerciseFormAnalysis::skipped(previous);
        }

        let frame = Frame {
            pose,
            timestamp,
            thresholds: &self.config.thresholds,
        };
        let mut issues = Vec::new();

        let state = match family {
            ExerciseFamily::Squat => squat::evaluate(&frame, &previous, &mut issues),
            ExerciseFamily::Curl => curl::evaluate(&frame, &previous, &mut issues),
            ExerciseFamily::Crunch => crunch::evaluate(&frame, &previous, &mut issues),
            ExerciseFamily::PlankLine => {
                plank::evaluate(&frame, &mut issues);
                previous
            }
            ExerciseFamily::Generic => {
                posture::check_level(&frame, &mut issues);
                previous
            }
        };

        tracing::trace!(
            exercise_id,
            ?family,
            rep_state = ?state.rep_state,
            rep_count = state.rep_count,
            issue_count = issues.len(),
            "Frame analyzed"
        );

        ExerciseFormAnalysis::assessed(state, issues)
    }
}

/// Analyze one frame with the default thresholds.
pub fn analyze(
    exercise_id: &str,
    landmarks: &[Landmark],
    timestamp: EpochMillis,
    previous: Option<&ExerciseState>,
) -> ExerciseFormAnalysis {
    FormAnalyzer::default().analyze(exercise_id, landmarks, timestamp, previous)
}

/// Log a counted rep. Shared by the rep-counting families.
fn log_rep(family: ExerciseFamily, step: &RepStep, signal: f64) {
    if step.rep_counted {
        tracing::debug!(
            ?family,
            rep_count = step.state.rep_count,
            signal,
            "Rep counted"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
