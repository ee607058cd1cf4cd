//! Runtime configuration
//!
//! Suggestion thresholds travel in `SuggestionConfig` so they can be tuned
//! per user or per exercise. `AppConfig::from_env` reads overrides after
//! `.env` has been loaded.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::CoachError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://lift-coach.db?mode=rwc";
const DEFAULT_HISTORY_LIMIT: u32 = 5;

/// ---------------------------------------------------------------------------
/// Set Matching: which set of a past session stands in for a set position
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetMatching {
  /// Exact set number, else the first set of that session
  #[default]
  ExactOrFirst,
  /// Exact set number only; sessions without it are skipped
  ExactOnly,
}

impl std::fmt::Display for SetMatching {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::ExactOrFirst => write!(f, "exact_or_first"),
      Self::ExactOnly => write!(f, "exact_only"),
    }
  }
}

impl FromStr for SetMatching {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "exact_or_first" => Ok(Self::ExactOrFirst),
      "exact_only" => Ok(Self::ExactOnly),
      _ => Err(format!("Unknown set matching policy: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Suggestion Thresholds
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
  /// Reps at or above this count as a successful session
  pub min_reps_success: u32,
  /// Rep count at which load goes up
  pub target_reps: u32,
  pub weight_increment: f64,
  pub weight_increment_heavy: f64,
  /// Sessions at one weight needed before a plateau is called
  pub stagnation_sessions: usize,
  /// Multiplier applied to the last weight on deload or reduce
  pub deload_percentage: f64,
  /// Upper bound for rep-only progression
  pub rep_ceiling: u32,
  /// Reps prescribed after a weight reduction
  pub reset_reps: u32,
  pub set_matching: SetMatching,
}

impl Default for SuggestionConfig {
  fn default() -> Self {
    Self {
      min_reps_success: 8,
      target_reps: 12,
      weight_increment: 2.5,
      weight_increment_heavy: 5.0,
      stagnation_sessions: 3,
      deload_percentage: 0.9,
      rep_ceiling: 15,
      reset_reps: 10,
      set_matching: SetMatching::ExactOrFirst,
    }
  }
}

impl SuggestionConfig {
  pub fn validate(&self) -> Result<(), CoachError> {
    if self.min_reps_success == 0 || self.min_reps_success > self.target_reps {
      return Err(CoachError::InvalidConfig(format!(
        "min_reps_success ({}) must be between 1 and target_reps ({})",
        self.min_reps_success, self.target_reps
      )));
    }
    if self.weight_increment <= 0.0 || self.weight_increment_heavy <= 0.0 {
      return Err(CoachError::InvalidConfig(
        "weight increments must be positive".to_string(),
      ));
    }
    if self.stagnation_sessions < 2 {
      return Err(CoachError::InvalidConfig(format!(
        "stagnation_sessions ({}) must be at least 2",
        self.stagnation_sessions
      )));
    }
    if !(self.deload_percentage > 0.0 && self.deload_percentage < 1.0) {
      return Err(CoachError::InvalidConfig(format!(
        "deload_percentage ({}) must be in (0, 1)",
        self.deload_percentage
      )));
    }
    if self.rep_ceiling < self.target_reps {
      return Err(CoachError::InvalidConfig(format!(
        "rep_ceiling ({}) must not be below target_reps ({})",
        self.rep_ceiling, self.target_reps
      )));
    }
    Ok(())
  }

  /// Apply `LIFT_COACH_*` overrides on top of the defaults
  pub fn from_env() -> Result<Self, CoachError> {
    let defaults = Self::default();
    let config = Self {
      min_reps_success: env_or("LIFT_COACH_MIN_REPS_SUCCESS", defaults.min_reps_success)?,
      target_reps: env_or("LIFT_COACH_TARGET_REPS", defaults.target_reps)?,
      weight_increment: env_or("LIFT_COACH_WEIGHT_INCREMENT", defaults.weight_increment)?,
      weight_increment_heavy: env_or(
        "LIFT_COACH_WEIGHT_INCREMENT_HEAVY",
        defaults.weight_increment_heavy,
      )?,
      stagnation_sessions: env_or(
        "LIFT_COACH_STAGNATION_SESSIONS",
        defaults.stagnation_sessions,
      )?,
      deload_percentage: env_or("LIFT_COACH_DELOAD_PERCENTAGE", defaults.deload_percentage)?,
      rep_ceiling: env_or("LIFT_COACH_REP_CEILING", defaults.rep_ceiling)?,
      reset_reps: env_or("LIFT_COACH_RESET_REPS", defaults.reset_reps)?,
      set_matching: env_or("LIFT_COACH_SET_MATCHING", defaults.set_matching)?,
    };
    config.validate()?;
    Ok(config)
  }
}

/// ---------------------------------------------------------------------------
/// Application Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  /// Number of past sessions fed to the engine
  pub history_limit: u32,
  pub suggestion: SuggestionConfig,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      history_limit: DEFAULT_HISTORY_LIMIT,
      suggestion: SuggestionConfig::default(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, CoachError> {
    let database_url =
      env::var("LIFT_COACH_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    if database_url.trim().is_empty() {
      return Err(CoachError::MissingConfig("LIFT_COACH_DATABASE_URL".into()));
    }

    let history_limit = env_or("LIFT_COACH_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
    if history_limit == 0 {
      return Err(CoachError::InvalidConfig(
        "LIFT_COACH_HISTORY_LIMIT must be at least 1".to_string(),
      ));
    }

    Ok(Self {
      database_url,
      history_limit,
      suggestion: SuggestionConfig::from_env()?,
    })
  }
}

/// Read and parse an env var, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> Result<T, CoachError>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(key) {
    Ok(raw) => raw
      .trim()
      .parse()
      .map_err(|e| CoachError::InvalidConfig(format!("{}={:?}: {}", key, raw, e))),
    Err(_) => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn test_default_config_is_valid() {
    let config = SuggestionConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.min_reps_success, 8);
    assert_eq!(config.target_reps, 12);
    assert_eq!(config.weight_increment, 2.5);
    assert_eq!(config.weight_increment_heavy, 5.0);
    assert_eq!(config.stagnation_sessions, 3);
    assert_eq!(config.set_matching, SetMatching::ExactOrFirst);
  }

  #[test]
  fn test_validate_rejects_bad_thresholds() {
    let mut config = SuggestionConfig::default();
    config.min_reps_success = 14;
    assert!(config.validate().is_err());

    let mut config = SuggestionConfig::default();
    config.deload_percentage = 1.2;
    assert!(config.validate().is_err());

    let mut config = SuggestionConfig::default();
    config.stagnation_sessions = 1;
    assert!(config.validate().is_err());

    let mut config = SuggestionConfig::default();
    config.weight_increment = 0.0;
    assert!(config.validate().is_err());
  }

  #[test]
  #[serial]
  fn test_from_env_uses_defaults_when_unset() {
    temp_env::with_vars_unset(
      [
        "LIFT_COACH_DATABASE_URL",
        "LIFT_COACH_HISTORY_LIMIT",
        "LIFT_COACH_MIN_REPS_SUCCESS",
        "LIFT_COACH_TARGET_REPS",
        "LIFT_COACH_WEIGHT_INCREMENT",
        "LIFT_COACH_WEIGHT_INCREMENT_HEAVY",
        "LIFT_COACH_STAGNATION_SESSIONS",
        "LIFT_COACH_DELOAD_PERCENTAGE",
        "LIFT_COACH_REP_CEILING",
        "LIFT_COACH_RESET_REPS",
        "LIFT_COACH_SET_MATCHING",
      ],
      || {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.suggestion, SuggestionConfig::default());
      },
    );
  }

  #[test]
  #[serial]
  fn test_from_env_applies_overrides() {
    temp_env::with_vars(
      [
        ("LIFT_COACH_DATABASE_URL", Some("sqlite::memory:")),
        ("LIFT_COACH_HISTORY_LIMIT", Some("8")),
        ("LIFT_COACH_WEIGHT_INCREMENT", Some("1.25")),
        ("LIFT_COACH_SET_MATCHING", Some("exact_only")),
      ],
      || {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.history_limit, 8);
        assert_eq!(config.suggestion.weight_increment, 1.25);
        assert_eq!(config.suggestion.set_matching, SetMatching::ExactOnly);
      },
    );
  }

  #[test]
  #[serial]
  fn test_from_env_rejects_unparseable_value() {
    temp_env::with_var("LIFT_COACH_TARGET_REPS", Some("twelve"), || {
      let err = AppConfig::from_env().unwrap_err();
      assert!(matches!(err, CoachError::InvalidConfig(_)));
      assert!(err.to_string().contains("LIFT_COACH_TARGET_REPS"));
    });
  }

  #[test]
  #[serial]
  fn test_from_env_rejects_zero_history_limit() {
    temp_env::with_var("LIFT_COACH_HISTORY_LIMIT", Some("0"), || {
      assert!(AppConfig::from_env().is_err());
    });
  }
}
