//! Post-session scoring and coaching feedback.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::issue::{FormIssue, IssueType, Severity};
use crate::session::ExerciseSession;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub const MAX_FORM_SCORE: u8 = 100;

/// Points deducted per issue of each severity.
pub const HIGH_SEVERITY_PENALTY: i64 = 15;
pub const MEDIUM_SEVERITY_PENALTY: i64 = 8;
pub const LOW_SEVERITY_PENALTY: i64 = 3;

/// Form score in `0..=100`: starts at 100 and loses points per issue.
pub fn form_score(issues: &[FormIssue]) -> u8 {
    let penalty: i64 = issues
        .iter()
        .map(|i| match i.severity {
            Severity::High => HIGH_SEVERITY_PENALTY,
            Severity::Medium => MEDIUM_SEVERITY_PENALTY,
            Severity::Low => LOW_SEVERITY_PENALTY,
        })
        .sum();
    (i64::from(MAX_FORM_SCORE) - penalty).clamp(0, i64::from(MAX_FORM_SCORE)) as u8
}

/// Qualitative band for a form score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl ScoreLabel {
    /// - `Excellent`        -- score >= 80
    /// - `Good`             -- score >= 60
    /// - `NeedsImprovement` -- score >= 40
    /// - `Poor`             -- otherwise
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::NeedsImprovement,
            _ => Self::Poor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Poor => "Poor",
        }
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

pub fn group_by_type(issues: &[FormIssue]) -> BTreeMap<IssueType, Vec<FormIssue>> {
    let mut groups: BTreeMap<IssueType, Vec<FormIssue>> = BTreeMap::new();
    for issue in issues {
        groups.entry(issue.issue_type).or_default().push(issue.clone());
    }
    groups
}

/// Distinct tips in first-seen order.
pub fn unique_tips(issues: &[FormIssue]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tips = Vec::new();
    for issue in issues {
        if seen.insert(issue.tip.as_str()) {
            tips.push(issue.tip.clone());
        }
    }
    tips
}

const SUGGESTIONS: &[(IssueType, &str)] = &[
    (
        IssueType::Alignment,
        "Focus on maintaining proper body alignment throughout each rep. Use a mirror or record yourself to check your form.",
    ),
    (
        IssueType::Posture,
        "Work on core stability exercises to improve your posture during exercises.",
    ),
    (
        IssueType::RangeOfMotion,
        "Try to achieve full range of motion in each rep. Start with lighter weights if needed.",
    ),
    (
        IssueType::Speed,
        "Slow down your movements. Focus on controlled, deliberate reps rather than speed.",
    ),
];

pub const NO_ISSUES_SUGGESTION: &str =
    "Great job! Keep maintaining this form and gradually increase intensity.";

/// One suggestion per issue type present, in a fixed order.
pub fn improvement_suggestions(issues: &[FormIssue]) -> Vec<&'static str> {
    let suggestions: Vec<&'static str> = SUGGESTIONS
        .iter()
        .filter(|(kind, _)| issues.iter().any(|i| i.issue_type == *kind))
        .map(|(_, text)| *text)
        .collect();

    if suggestions.is_empty() {
        vec![NO_ISSUES_SUGGESTION]
    } else {
        suggestions
    }
}

// ---------------------------------------------------------------------------
// ExerciseSummary
// ---------------------------------------------------------------------------

/// Scored recap of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    pub exercise_name: String,
    pub total_sets: usize,
    pub total_reps: u32,
    pub duration_secs: i64,
    pub form_score: u8,
    pub score_label: ScoreLabel,
    pub issues_by_type: BTreeMap<IssueType, Vec<FormIssue>>,
    pub tips: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ExerciseSession {
    pub fn summary(&self) -> ExerciseSummary {
        let score = form_score(&self.form_issues);
        ExerciseSummary {
            exercise_name: self.exercise_name.clone(),
            total_sets: self.sets,
            total_reps: self.total_reps(),
            duration_secs: self.duration_secs,
            form_score: score,
            score_label: ScoreLabel::from_score(score),
            issues_by_type: group_by_type(&self.form_issues),
            tips: unique_tips(&self.form_issues),
            suggestions: improvement_suggestions(&self.form_issues)
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
