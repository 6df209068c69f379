use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::thresholds::ThresholdTable;

/// Landmarks reporting a visibility below this are treated as undetected.
pub const DEFAULT_MIN_VISIBILITY: f64 = 0.5;

pub const ENV_MIN_VISIBILITY: &str = "FORMCHECK_MIN_VISIBILITY";
pub const ENV_SQUAT_MIN_REP_MS: &str = "FORMCHECK_SQUAT_MIN_REP_MS";
pub const ENV_CURL_MIN_REP_MS: &str = "FORMCHECK_CURL_MIN_REP_MS";
pub const ENV_CRUNCH_MIN_REP_MS: &str = "FORMCHECK_CRUNCH_MIN_REP_MS";

/// Analyzer configuration.
///
/// Defaults are the tuned values; environment variables override the
/// visibility floor and the per-family debounce windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    /// Minimum visibility for a required landmark (`0.0` disables the gate).
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_visibility: f64,
    pub thresholds: ThresholdTable,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
            thresholds: ThresholdTable::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load overrides from environment variables.
    ///
    /// | Env Var                       | Default |
    /// |-------------------------------|---------|
    /// | `FORMCHECK_MIN_VISIBILITY`    | `0.5`   |
    /// | `FORMCHECK_SQUAT_MIN_REP_MS`  | `500`   |
    /// | `FORMCHECK_CURL_MIN_REP_MS`   | `300`   |
    /// | `FORMCHECK_CRUNCH_MIN_REP_MS` | `400`   |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, ENV_MIN_VISIBILITY)? {
            config.min_visibility = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SQUAT_MIN_REP_MS)? {
            config.thresholds.squat.min_rep_interval_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_CURL_MIN_REP_MS)? {
            config.thresholds.curl.min_rep_interval_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_CRUNCH_MIN_REP_MS)? {
            config.thresholds.crunch.min_rep_interval_ms = v;
        }

        config.ensure_valid()?;
        Ok(config)
    }

    /// Validate field ranges and the threshold table.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        self.thresholds.validate()
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| CoreError::Config {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn no_overrides_gives_defaults() {
        let config = AnalyzerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let config = AnalyzerConfig::from_lookup(lookup(&[
            (ENV_MIN_VISIBILITY, "0.7"),
            (ENV_SQUAT_MIN_REP_MS, " 800 "),
            (ENV_CURL_MIN_REP_MS, "250"),
            (ENV_CRUNCH_MIN_REP_MS, "0"),
        ]))
        .unwrap();
        assert_eq!(config.min_visibility, 0.7);
        assert_eq!(config.thresholds.squat.min_rep_interval_ms, 800);
        assert_eq!(config.thresholds.curl.min_rep_interval_ms, 250);
        assert_eq!(config.thresholds.crunch.min_rep_interval_ms, 0);
    }

    #[test]
    fn unparseable_value_names_the_variable() {
        let err = AnalyzerConfig::from_lookup(lookup(&[(ENV_CURL_MIN_REP_MS, "fast")]))
            .unwrap_err();
        assert_matches!(err, CoreError::Config { var: ENV_CURL_MIN_REP_MS, .. });
    }

    #[test]
    fn out_of_range_visibility_rejected() {
        let err = AnalyzerConfig::from_lookup(lookup(&[(ENV_MIN_VISIBILITY, "1.5")]))
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn negative_debounce_rejected() {
        let err = AnalyzerConfig::from_lookup(lookup(&[(ENV_SQUAT_MIN_REP_MS, "-5")]))
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
