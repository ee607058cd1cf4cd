//! Adaptive set suggestions for strength training.
//!
//! Looks at how a lifter performed a given set over recent sessions and
//! proposes the weight and reps for the next one.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod logging;
pub mod messages;
pub mod models;
pub mod progression;

#[cfg(test)]
mod test_utils;

pub use config::{AppConfig, SetMatching, SuggestionConfig};
pub use db::{initialize_db, AppState, DbPool};
pub use error::CoachError;
pub use messages::{format_suggestion_message, SuggestionDisplay};
pub use models::{
  Confidence, Exercise, PerformanceRecord, SessionHistoryEntry, SetInput, Suggestion,
  SuggestionType, Trend, WeightClass,
};
pub use progression::{ExerciseClassifier, HeavyLiftClassifier, SuggestionEngine};

use tracing::info;

/// Load `.env`, install logging, open the database and build the state
/// commands run against.
pub async fn init() -> Result<AppState, CoachError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  logging::LoggingConfig::from_env()?.init()?;

  let config = AppConfig::from_env()?;
  let pool = initialize_db(&config.database_url).await?;

  info!(history_limit = config.history_limit, "Lift coach ready");

  Ok(AppState::new(pool, config))
}
