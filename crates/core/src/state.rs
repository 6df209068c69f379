//! Per-session rep-counting state threaded through the analyzer by the caller.

use serde::{Deserialize, Serialize};

use crate::types::EpochMillis;

/// Initial `lowest_angle`: a fully extended joint.
pub const INITIAL_LOWEST_ANGLE: f64 = 180.0;
/// Initial `highest_angle`: a fully folded joint.
pub const INITIAL_HIGHEST_ANGLE: f64 = 0.0;

/// Progress through one repetition cycle.
///
/// `Up` and `Down` are settled phases. The transitioning phases mean the
/// signal has left one settled zone but has not yet confirmed the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepState {
    #[default]
    Up,
    Down,
    TransitioningDown,
    TransitioningUp,
}

/// Caller-owned analyzer memory for one exercise attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseState {
    pub rep_state: RepState,
    pub rep_count: u32,
    /// Time of the last counted rep; `0` until the first rep.
    pub last_rep_time: EpochMillis,
    pub lowest_angle: f64,
    pub highest_angle: f64,
}

impl Default for ExerciseState {
    fn default() -> Self {
        Self {
            rep_state: RepState::Up,
            rep_count: 0,
            last_rep_time: 0,
            lowest_angle: INITIAL_LOWEST_ANGLE,
            highest_angle: INITIAL_HIGHEST_ANGLE,
        }
    }
}

impl ExerciseState {
    /// Milliseconds since the last counted rep, or `None` before the first.
    ///
    /// Out-of-order timestamps saturate to zero.
    pub fn millis_since_last_rep(&self, now: EpochMillis) -> Option<i64> {
        (self.last_rep_time > 0).then(|| now.saturating_sub(self.last_rep_time).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_session_start() {
        let s = ExerciseState::default();
        assert_eq!(s.rep_state, RepState::Up);
        assert_eq!(s.rep_count, 0);
        assert_eq!(s.last_rep_time, 0);
        assert_eq!(s.lowest_angle, 180.0);
        assert_eq!(s.highest_angle, 0.0);
    }

    #[test]
    fn no_previous_rep_has_no_elapsed_time() {
        assert_eq!(ExerciseState::default().millis_since_last_rep(10_000), None);
    }

    #[test]
    fn elapsed_saturates_on_clock_skew() {
        let s = ExerciseState {
            last_rep_time: 5_000,
            ..ExerciseState::default()
        };
        assert_eq!(s.millis_since_last_rep(5_750), Some(750));
        assert_eq!(s.millis_since_last_rep(4_000), Some(0));
    }

    #[test]
    fn rep_state_wire_names() {
        assert_eq!(
            serde_json::to_value(RepState::TransitioningDown).unwrap(),
            "TRANSITIONING_DOWN"
        );
        assert_eq!(serde_json::to_value(RepState::Up).unwrap(), "UP");
    }
}
