use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::AppConfig;
use crate::error::CoachError;
use crate::progression::SuggestionEngine;

pub type DbPool = SqlitePool;

/// Application state handed to every command
pub struct AppState {
  pub db: DbPool,
  pub config: AppConfig,
  pub engine: SuggestionEngine,
}

impl AppState {
  pub fn new(db: DbPool, config: AppConfig) -> Self {
    let engine = SuggestionEngine::new(config.suggestion.clone());
    Self { db, config, engine }
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(database_url: &str) -> Result<DbPool, CoachError> {
  info!(database_url, "Initializing database");

  // Create connection pool
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  // Run migrations
  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_initialize_db_runs_migrations() {
    let path = std::env::temp_dir().join(format!(
      "lift-coach-test-{}-{}.db",
      std::process::id(),
      chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let pool = initialize_db(&url).await.expect("Should initialize");

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('exercises', 'routines', 'workout_sessions', 'workout_sets')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");
    assert_eq!(tables.len(), 4);

    // Running migrations again on an up-to-date database is a no-op
    pool.close().await;
    let pool = initialize_db(&url).await.expect("Should reopen");
    pool.close().await;

    let _ = std::fs::remove_file(&path);
  }

  #[tokio::test]
  async fn test_initialize_db_bad_url() {
    let result = initialize_db("postgres://nowhere").await;
    assert!(matches!(result, Err(CoachError::Database(_))));
  }

  #[tokio::test]
  async fn test_app_state_builds_engine_from_config() {
    let pool = crate::test_utils::setup_test_db().await;
    let mut config = AppConfig::default();
    config.suggestion.weight_increment = 1.25;

    let state = AppState::new(pool, config);

    assert_eq!(state.engine.config().weight_increment, 1.25);
    crate::test_utils::teardown_test_db(state.db).await;
  }
}
