//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seeders for exercises, sessions and sets
//! - In-memory history factories
//! - Helper assertions

use crate::analysis::SetHistoryPoint;
use crate::models::{PerformanceRecord, SessionHistoryEntry};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert an exercise, optionally with a stored weight class
pub async fn seed_exercise(pool: &SqlitePool, name: &str, weight_class: Option<&str>) -> i64 {
  sqlx::query("INSERT INTO exercises (name, weight_class) VALUES (?1, ?2)")
    .bind(name)
    .bind(weight_class)
    .execute(pool)
    .await
    .expect("Failed to seed exercise")
    .last_insert_rowid()
}

pub async fn seed_routine(pool: &SqlitePool, name: &str) -> i64 {
  sqlx::query("INSERT INTO routines (name) VALUES (?1)")
    .bind(name)
    .execute(pool)
    .await
    .expect("Failed to seed routine")
    .last_insert_rowid()
}

/// Insert a session that started `days_ago`; completed sessions get a
/// completion timestamp one hour after the start
pub async fn seed_session(
  pool: &SqlitePool,
  routine_id: Option<i64>,
  days_ago: i64,
  completed: bool,
) -> i64 {
  let started_at = datetime_days_ago(days_ago);
  let completed_at = completed.then(|| started_at + Duration::hours(1));

  sqlx::query(
    r#"
    INSERT INTO workout_sessions (routine_id, started_at, completed_at)
    VALUES (?1, ?2, ?3)
    "#,
  )
  .bind(routine_id)
  .bind(started_at)
  .bind(completed_at)
  .execute(pool)
  .await
  .expect("Failed to seed session")
  .last_insert_rowid()
}

/// Insert a raw set row; values are not validated so malformed rows can be seeded
pub async fn seed_set(
  pool: &SqlitePool,
  session_id: i64,
  exercise_id: i64,
  set_number: i64,
  weight: f64,
  reps: i64,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO workout_sets (session_id, exercise_id, set_number, weight, reps, completed)
    VALUES (?1, ?2, ?3, ?4, ?5, 1)
    "#,
  )
  .bind(session_id)
  .bind(exercise_id)
  .bind(set_number)
  .bind(weight)
  .bind(reps)
  .execute(pool)
  .await
  .expect("Failed to seed set")
  .last_insert_rowid()
}

/// Seed one completed session per (weight, reps) entry, newest first,
/// each holding a single set 1. Returns the session ids in the same order.
pub async fn seed_single_set_history(
  pool: &SqlitePool,
  exercise_id: i64,
  routine_id: Option<i64>,
  entries: &[(f64, u32)],
) -> Vec<i64> {
  let mut session_ids = Vec::new();

  for (i, (weight, reps)) in entries.iter().enumerate() {
    let session_id = seed_session(pool, routine_id, i as i64 * 2, true).await;
    seed_set(pool, session_id, exercise_id, 1, *weight, *reps as i64).await;
    session_ids.push(session_id);
  }

  session_ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Build a session from (set_number, weight, reps) tuples
pub fn session(session_id: i64, days_ago: i64, sets: &[(u32, f64, u32)]) -> SessionHistoryEntry {
  SessionHistoryEntry {
    session_id,
    date: datetime_days_ago(days_ago),
    sets: sets
      .iter()
      .map(|(n, w, r)| PerformanceRecord::new(*n, *w, *r))
      .collect(),
  }
}

/// One single-set session per (weight, reps) entry, newest first
pub fn single_set_history(entries: &[(f64, u32)]) -> Vec<SessionHistoryEntry> {
  let count = entries.len() as i64;
  entries
    .iter()
    .enumerate()
    .map(|(i, (weight, reps))| session(count - i as i64, i as i64 * 2, &[(1, *weight, *reps)]))
    .collect()
}

/// Set history points, newest first
pub fn history_points(entries: &[(f64, u32)]) -> Vec<SetHistoryPoint> {
  entries
    .iter()
    .enumerate()
    .map(|(i, (weight, reps))| SetHistoryPoint {
      date: datetime_days_ago(i as i64 * 2),
      weight: *weight,
      reps: *reps,
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Create a DateTime N days ago from now
pub fn datetime_days_ago(days: i64) -> DateTime<Utc> {
  Utc::now() - Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('exercises', 'workout_sessions', 'workout_sets')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 3, "Expected 3 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_single_set_history_returns_correct_count() {
    let pool = setup_test_db().await;
    let exercise = seed_exercise(&pool, "Squat", None).await;

    let ids = seed_single_set_history(&pool, exercise, None, &[(100.0, 5), (95.0, 6), (90.0, 8)]).await;
    assert_eq!(ids.len(), 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workout_sets WHERE exercise_id = ?1")
      .bind(exercise)
      .fetch_one(&pool)
      .await
      .expect("Failed to count sets");

    assert_eq!(count, 3);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_factories_are_newest_first() {
    let history = single_set_history(&[(60.0, 8), (57.5, 9), (55.0, 10)]);
    assert_eq!(history.len(), 3);
    assert!(history[0].date > history[1].date);
    assert!(history[0].session_id > history[1].session_id);
    assert_eq!(history[2].sets[0], PerformanceRecord::new(1, 55.0, 10));

    let points = history_points(&[(60.0, 8), (57.5, 9)]);
    assert!(points[0].date > points[1].date);
  }

  #[test]
  fn test_datetime_helper_produces_correct_dates() {
    let now = Utc::now();
    let past = datetime_days_ago(7);

    let diff = now - past;
    // Allow for slight timing differences (6-8 days is acceptable)
    assert!(diff.num_days() >= 6 && diff.num_days() <= 8,
            "Expected ~7 days difference, got {}", diff.num_days());
  }
}
