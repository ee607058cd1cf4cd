//! Commands for the set-suggestion engine
//!
//! Callers hand in an `AppState`; history comes from SQLite, the
//! engine decides.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::db::AppState;
use crate::error::CoachError;
use crate::history::{self, load_exercise, load_performance_history};
use crate::models::{SessionHistoryEntry, SetInput, Suggestion, WeightClass};

/// What the caller knows about the set it is about to fill in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub exercise_id: i64,
    /// Restrict history to sessions of this routine
    pub routine_id: Option<i64>,
    /// 1-based position of the set within the exercise
    pub set_number: u32,
    pub exercise_name: String,
    /// Explicit classification, overrides stored and name-based ones
    #[serde(default)]
    pub weight_class: Option<WeightClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSet {
    pub set_number: u32,
    pub suggestion: Option<Suggestion>,
}

/// Suggest weight and reps for the next set.
///
/// `Ok(None)` means no usable history; the caller leaves its inputs empty.
pub async fn suggest_next_set(
    state: &AppState,
    request: SuggestionRequest,
) -> Result<Option<Suggestion>, CoachError> {
    if request.set_number == 0 {
        return Err(CoachError::InvalidRecord(
            "set number must be at least 1".to_string(),
        ));
    }

    let history = match load_performance_history(
        &state.db,
        request.exercise_id,
        request.routine_id,
        state.config.history_limit,
    )
    .await
    {
        Ok(history) => history,
        Err(e) => {
            warn!(
                exercise_id = request.exercise_id,
                error = %e,
                "history unavailable, no suggestion"
            );
            return Ok(None);
        }
    };

    let weight_class = match request.weight_class {
        Some(class) => class,
        None => {
            let stored = stored_weight_class(state, request.exercise_id).await;
            state
                .engine
                .resolve_weight_class(&request.exercise_name, stored)
        }
    };

    Ok(state
        .engine
        .suggest_for_class(&history, request.set_number, weight_class))
}

/// Suggestions for set positions `1..=set_count` from a single history load
pub async fn suggest_session_plan(
    state: &AppState,
    exercise_id: i64,
    routine_id: Option<i64>,
    set_count: u32,
) -> Result<Vec<PlannedSet>, CoachError> {
    let exercise = load_exercise(&state.db, exercise_id).await?;
    let history = load_performance_history(
        &state.db,
        exercise_id,
        routine_id,
        state.config.history_limit,
    )
    .await?;

    let weight_class = state
        .engine
        .resolve_weight_class(&exercise.name, exercise.weight_class);

    let plan: Vec<PlannedSet> = (1..=set_count)
        .map(|set_number| PlannedSet {
            set_number,
            suggestion: state
                .engine
                .suggest_for_class(&history, set_number, weight_class),
        })
        .collect();

    debug!(
        exercise_id,
        set_count,
        suggested = plan.iter().filter(|p| p.suggestion.is_some()).count(),
        "session plan built"
    );

    Ok(plan)
}

/// Recent completed sessions of an exercise, newest first
pub async fn get_performance_history(
    state: &AppState,
    exercise_id: i64,
    routine_id: Option<i64>,
) -> Result<Vec<SessionHistoryEntry>, CoachError> {
    load_performance_history(
        &state.db,
        exercise_id,
        routine_id,
        state.config.history_limit,
    )
    .await
}

/// Persist the set the lifter actually performed
pub async fn record_completed_set(
    state: &AppState,
    session_id: i64,
    exercise_id: i64,
    set_number: u32,
    input: SetInput,
) -> Result<i64, CoachError> {
    history::record_completed_set(&state.db, session_id, exercise_id, set_number, input).await
}

/// Stored class of the exercise, if it exists and has one
async fn stored_weight_class(state: &AppState, exercise_id: i64) -> Option<WeightClass> {
    match load_exercise(&state.db, exercise_id).await {
        Ok(exercise) => exercise.weight_class,
        Err(CoachError::NotFound(_)) => None,
        Err(e) => {
            warn!(exercise_id, error = %e, "could not load exercise");
            None
        }
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
