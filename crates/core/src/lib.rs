//! `formcheck-core` -- real-time exercise form analysis and rep counting.
//!
//! Consumes per-frame pose landmarks and produces form issues plus a
//! running rep count. All logic is pure; callers own and thread
//! [`ExerciseState`] between frames.

pub mod analysis;
pub mod config;
pub mod error;
pub mod exercise;
pub mod geometry;
pub mod issue;
pub mod landmarks;
pub mod rep_counter;
pub mod session;
pub mod state;
pub mod summary;
pub mod thresholds;
pub mod types;

pub use analysis::{analyze, ExerciseFormAnalysis, FormAnalyzer};
pub use config::AnalyzerConfig;
pub use error::CoreError;
pub use issue::{FormCheck, FormIssue, IssueType, Severity};
pub use landmarks::{Landmark, PoseLandmark};
pub use session::{ExerciseSession, SessionTracker};
pub use state::{ExerciseState, RepState};
