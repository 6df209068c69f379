//! Session controller: threads analyzer state across frames for one exercise.
//!
//! Owns the only mutable copy of [`ExerciseState`] for the session, credits
//! new reps to the current set, and keeps the issue history the summary
//! is computed from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{ExerciseFormAnalysis, FormAnalyzer};
use crate::error::CoreError;
use crate::exercise::display_name;
use crate::issue::{FormIssue, Severity};
use crate::landmarks::Landmark;
use crate::state::ExerciseState;
use crate::types::{EpochMillis, Timestamp};

/// Number of distinct issues surfaced for live display.
pub const MAX_RECENT_ISSUES: usize = 3;

/// Live form indicator derived from the latest frame's issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Good,
    Warning,
    Poor,
}

impl FormStatus {
    pub fn from_issues(issues: &[FormIssue]) -> Self {
        match issues.iter().map(|i| i.severity).max() {
            Some(Severity::High) => Self::Poor,
            Some(Severity::Medium) => Self::Warning,
            Some(Severity::Low) | None => Self::Good,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionTracker
// ---------------------------------------------------------------------------

/// One in-progress exercise attempt.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    id: Uuid,
    analyzer: FormAnalyzer,
    exercise_id: String,
    started_at: EpochMillis,
    paused: bool,
    state: ExerciseState,
    set_reps: Vec<u32>,
    issues: Vec<FormIssue>,
    recent_issues: Vec<FormIssue>,
    status: FormStatus,
}

impl SessionTracker {
    /// Begin recording `exercise_id` at `now` with a fresh state machine.
    pub fn start(analyzer: FormAnalyzer, exercise_id: impl Into<String>, now: EpochMillis) -> Self {
        let exercise_id = exercise_id.into();
        let id = Uuid::now_v7();
        tracing::debug!(session_id = %id, exercise_id = %exercise_id, "Session started");
        Self {
            id,
            analyzer,
            exercise_id,
            started_at: now,
            paused: false,
            state: ExerciseState::default(),
            set_reps: vec![0],
            issues: Vec::new(),
            recent_issues: Vec::new(),
            status: FormStatus::Good,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn state(&self) -> &ExerciseState {
        &self.state
    }

    pub fn rep_count(&self) -> u32 {
        self.state.rep_count
    }

    /// Reps per set; the last entry is the set in progress.
    pub fn set_reps(&self) -> &[u32] {
        &self.set_reps
    }

    /// 1-based number of the set in progress.
    pub fn current_set(&self) -> usize {
        self.set_reps.len()
    }

    pub fn issues(&self) -> &[FormIssue] {
        &self.issues
    }

    pub fn recent_issues(&self) -> &[FormIssue] {
        &self.recent_issues
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Close the current set and open an empty one.
    pub fn complete_set(&mut self) {
        self.set_reps.push(0);
        tracing::debug!(session_id = %self.id, set = self.current_set(), "Set started");
    }

    /// Analyze one frame. Returns `None` while paused.
    pub fn process_frame(
        &mut self,
        landmarks: &[Landmark],
        timestamp: EpochMillis,
    ) -> Option<ExerciseFormAnalysis> {
        if self.paused {
            return None;
        }

        let analysis = self
            .analyzer
            .analyze(&self.exercise_id, landmarks, timestamp, Some(&self.state));

        let gained = analysis
            .exercise_state
            .rep_count
            .saturating_sub(self.state.rep_count);
        if gained > 0 {
            if let Some(current) = self.set_reps.last_mut() {
                *current += gained;
            }
            tracing::debug!(
                session_id = %self.id,
                rep_count = analysis.exercise_state.rep_count,
                set = self.current_set(),
                "Rep recorded"
            );
        }
        self.state = analysis.exercise_state;

        if analysis.issues.is_empty() {
            self.status = FormStatus::Good;
            self.recent_issues.clear();
        } else {
            self.issues.extend(analysis.issues.iter().cloned());
            self.recent_issues = distinct_by_message(&analysis.issues, MAX_RECENT_ISSUES);
            self.status = FormStatus::from_issues(&analysis.issues);
        }

        Some(analysis)
    }

    /// End the session at `now`.
    pub fn finish(self, now: EpochMillis) -> Result<ExerciseSession, CoreError> {
        if now < self.started_at {
            return Err(CoreError::Validation(format!(
                "session cannot end ({now}) before it started ({})",
                self.started_at
            )));
        }
        let started_at = to_timestamp(self.started_at)?;
        let ended_at = to_timestamp(now)?;

        let session = ExerciseSession {
            id: self.id,
            exercise_name: display_name(&self.exercise_id).to_string(),
            exercise_id: self.exercise_id,
            sets: self.set_reps.len(),
            reps: self.set_reps,
            form_issues: self.issues,
            started_at,
            ended_at,
            duration_secs: (now - self.started_at) / 1_000,
        };
        tracing::info!(
            session_id = %session.id,
            exercise_id = %session.exercise_id,
            total_reps = session.total_reps(),
            issue_count = session.form_issues.len(),
            "Session finished"
        );
        Ok(session)
    }
}

fn to_timestamp(ms: EpochMillis) -> Result<Timestamp, CoreError> {
    chrono::DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| CoreError::Validation(format!("timestamp out of range: {ms}")))
}

/// First `limit` issues with distinct messages, in order.
fn distinct_by_message(issues: &[FormIssue], limit: usize) -> Vec<FormIssue> {
    let mut out: Vec<FormIssue> = Vec::with_capacity(limit);
    for issue in issues {
        if out.len() == limit {
            break;
        }
        if !out.iter().any(|seen| seen.message == issue.message) {
            out.push(issue.clone());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// ExerciseSession
// ---------------------------------------------------------------------------

/// A finished exercise attempt, ready to hand to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub id: Uuid,
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: usize,
    pub reps: Vec<u32>,
    pub form_issues: Vec<FormIssue>,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub duration_secs: i64,
}

impl ExerciseSession {
    pub fn total_reps(&self) -> u32 {
        self.reps.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
