//! Form issue taxonomy and the user-facing guidance for each check.

use serde::{Deserialize, Serialize};

use crate::types::EpochMillis;

/// Category of a form deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Posture,
    RangeOfMotion,
    Speed,
    Alignment,
}

/// Severity of a form deviation. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

// ---------------------------------------------------------------------------
// FormCheck
// ---------------------------------------------------------------------------

/// Every posture check the analyzer can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormCheck {
    ShouldersUneven,
    HipsUneven,
    ForwardLean,
    KneesPastToes,
    BackRounding,
    KneeValgus,
    ShallowDepth,
    ElbowDrift,
    BodyLineBroken,
    NeckPulling,
}

impl FormCheck {
    pub fn issue_type(self) -> IssueType {
        match self {
            Self::ShouldersUneven | Self::HipsUneven | Self::KneesPastToes | Self::KneeValgus => {
                IssueType::Alignment
            }
            Self::ForwardLean
            | Self::BackRounding
            | Self::ElbowDrift
            | Self::BodyLineBroken
            | Self::NeckPulling => IssueType::Posture,
            Self::ShallowDepth => IssueType::RangeOfMotion,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::ForwardLean | Self::BackRounding | Self::KneeValgus | Self::BodyLineBroken => {
                Severity::High
            }
            Self::ShouldersUneven | Self::HipsUneven | Self::KneesPastToes | Self::NeckPulling => {
                Severity::Medium
            }
            // Elbow drift is noisy on camera and must not dominate feedback.
            Self::ShallowDepth | Self::ElbowDrift => Severity::Low,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ShouldersUneven => "Shoulders are not level",
            Self::HipsUneven => "Hips are not level",
            Self::ForwardLean => "Excessive forward lean",
            Self::KneesPastToes => "Knees extending past toes",
            Self::BackRounding => "Back may be rounding",
            Self::KneeValgus => "Knees caving inward",
            Self::ShallowDepth => "Squat depth could be deeper",
            Self::ElbowDrift => "Elbows moving forward",
            Self::BodyLineBroken => "Body not in straight line",
            Self::NeckPulling => "Pulling with neck",
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            Self::ShouldersUneven => {
                "Keep your shoulders parallel to the ground. This helps maintain proper form and prevents injury."
            }
            Self::HipsUneven => {
                "Keep your hips level and aligned. This ensures balanced muscle engagement."
            }
            Self::ForwardLean => {
                "Keep your chest up and back straight. Avoid leaning too far forward as this puts strain on your lower back."
            }
            Self::KneesPastToes => {
                "Push your hips back more to keep your knees behind or in line with your toes. This reduces knee strain."
            }
            Self::BackRounding => {
                "Maintain a neutral spine by keeping your chest up and core engaged. Avoid rounding your lower back."
            }
            Self::KneeValgus => {
                "Keep your knees aligned with your toes. Push your knees out as you descend to engage your glutes properly."
            }
            Self::ShallowDepth => {
                "Aim to get your hips below your knees for full range of motion. This maximizes muscle engagement."
            }
            Self::ElbowDrift => {
                "Keep your elbows close to your body and stationary. Only your forearms should move during the curl."
            }
            Self::BodyLineBroken => {
                "Keep your body in a straight line from head to heels. Avoid arching your back or sagging your hips."
            }
            Self::NeckPulling => {
                "Focus on using your core muscles. Keep your neck relaxed and avoid pulling your head forward with your hands."
            }
        }
    }

    /// Materialize this check as an issue observed at `timestamp`.
    pub fn at(self, timestamp: EpochMillis) -> FormIssue {
        FormIssue {
            timestamp,
            check: self,
            issue_type: self.issue_type(),
            severity: self.severity(),
            message: self.message().to_string(),
            tip: self.tip().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// FormIssue
// ---------------------------------------------------------------------------

/// A failed check in a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormIssue {
    pub timestamp: EpochMillis,
    pub check: FormCheck,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub message: String,
    pub tip: String,
}

/// `true` when none of the issues is high severity.
pub fn is_proper_form(issues: &[FormIssue]) -> bool {
    !issues.iter().any(|i| i.severity == Severity::High)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
