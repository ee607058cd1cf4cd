/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CoachError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("Database error: {0}")]
  Database(String),

  #[error("Migration failed: {0}")]
  Migration(String),

  #[error("Invalid performance record: {0}")]
  InvalidRecord(String),

  #[error("Not found: {0}")]
  NotFound(String),
}

// Convert sqlx::Error to CoachError
impl From<sqlx::Error> for CoachError {
  fn from(e: sqlx::Error) -> Self {
    match e {
      sqlx::Error::RowNotFound => CoachError::NotFound("row not found".to_string()),
      other => CoachError::Database(other.to_string()),
    }
  }
}

impl From<sqlx::migrate::MigrateError> for CoachError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    CoachError::Migration(e.to_string())
  }
}
