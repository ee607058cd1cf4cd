//! History loader
//!
//! Reads recent completed sessions of one exercise from SQLite and hands
//! them to the engine newest first. Rows the engine cannot reason about
//! are dropped here with a warning.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use crate::error::CoachError;
use crate::models::{Exercise, PerformanceRecord, SessionHistoryEntry, SetInput, WeightClass};

// ---------------------------------------------------------------------------
// Database Operations
// ---------------------------------------------------------------------------

/// Load up to `limit` most recent completed sessions containing the exercise.
///
/// Only sessions holding at least one well-formed set count toward `limit`.
/// `routine_id` restricts the lookup to sessions of that routine.
pub async fn load_performance_history(
    pool: &SqlitePool,
    exercise_id: i64,
    routine_id: Option<i64>,
    limit: u32,
) -> Result<Vec<SessionHistoryEntry>, CoachError> {
    let session_rows = sqlx::query(
        r#"
        SELECT s.id, s.completed_at
        FROM workout_sessions s
        WHERE s.completed_at IS NOT NULL
          AND (?2 IS NULL OR s.routine_id = ?2)
          AND EXISTS (
            SELECT 1 FROM workout_sets ws
            WHERE ws.session_id = s.id
              AND ws.exercise_id = ?1
              AND ws.completed = 1
              AND ws.set_number >= 1
              AND ws.weight >= 0
              AND ws.reps >= 0
          )
        ORDER BY s.completed_at DESC, s.id DESC
        LIMIT ?3
        "#,
    )
    .bind(exercise_id)
    .bind(routine_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    let mut history = Vec::with_capacity(session_rows.len());
    for row in session_rows {
        let session_id: i64 = row.try_get("id")?;
        let date: DateTime<Utc> = row.try_get("completed_at")?;

        let sets = load_session_sets(pool, session_id, exercise_id).await?;
        if sets.is_empty() {
            continue;
        }

        history.push(SessionHistoryEntry {
            session_id,
            date,
            sets,
        });
    }

    debug!(
        exercise_id,
        ?routine_id,
        sessions = history.len(),
        "loaded performance history"
    );

    Ok(history)
}

/// Completed sets of one exercise within a session, in insertion order
async fn load_session_sets(
    pool: &SqlitePool,
    session_id: i64,
    exercise_id: i64,
) -> Result<Vec<PerformanceRecord>, CoachError> {
    let rows = sqlx::query(
        r#"
        SELECT set_number, weight, reps
        FROM workout_sets
        WHERE session_id = ?1 AND exercise_id = ?2 AND completed = 1
        ORDER BY id
        "#,
    )
    .bind(session_id)
    .bind(exercise_id)
    .fetch_all(pool)
    .await?;

    let mut sets = Vec::with_capacity(rows.len());
    for row in rows {
        let set_number: i64 = row.try_get("set_number")?;
        let weight: f64 = row.try_get("weight")?;
        let reps: i64 = row.try_get("reps")?;

        match PerformanceRecord::from_raw(set_number, weight, reps) {
            Ok(record) => sets.push(record),
            Err(e) => warn!(session_id, exercise_id, error = %e, "dropping malformed set"),
        }
    }

    Ok(sets)
}

/// Load one exercise with its stored weight class
pub async fn load_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Exercise, CoachError> {
    let row = sqlx::query("SELECT id, name, weight_class FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CoachError::NotFound(format!("Exercise {}", exercise_id)))?;

    let weight_class: Option<String> = row.try_get("weight_class")?;
    let weight_class = weight_class.and_then(|s| match s.parse::<WeightClass>() {
        Ok(class) => Some(class),
        Err(e) => {
            warn!(exercise_id, error = %e, "ignoring stored weight class");
            None
        }
    });

    Ok(Exercise {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        weight_class,
    })
}

/// Persist a set the lifter completed (accepted or overridden values)
pub async fn record_completed_set(
    pool: &SqlitePool,
    session_id: i64,
    exercise_id: i64,
    set_number: u32,
    input: SetInput,
) -> Result<i64, CoachError> {
    if set_number == 0 {
        return Err(CoachError::InvalidRecord(
            "set number must be at least 1".to_string(),
        ));
    }
    input.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO workout_sets (session_id, exercise_id, set_number, weight, reps, completed)
        VALUES (?1, ?2, ?3, ?4, ?5, 1)
        "#,
    )
    .bind(session_id)
    .bind(exercise_id)
    .bind(i64::from(set_number))
    .bind(input.weight)
    .bind(i64::from(input.reps))
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
