//! Adaptive Set-Suggestion Engine
//!
//! Turns the recent history of one exercise into a concrete next set:
//! - extract the performance at the requested set position per session
//! - reduce it to statistics and a trend
//! - map (statistics, trend, weight class) to weight, reps and confidence
//!
//! Key principles:
//! - History-driven, deterministic, no hidden state
//! - A fresh load jump is consolidated, never read as regression
//! - Weight reductions land on the nearest half unit
//! - No data means no suggestion; the caller keeps its own fallback

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{detect_trend, extract_set_history, Statistics};
use crate::config::SuggestionConfig;
use crate::messages::suggestion_text;
use crate::models::{Confidence, SessionHistoryEntry, Suggestion, SuggestionType, Trend, WeightClass};

/// Success rate needed before a progressing lifter adds load
const INCREASE_WEIGHT_SUCCESS_RATE: f64 = 0.8;
/// Below this a plateau is treated as fatigue and deloaded
const DELOAD_SUCCESS_RATE: f64 = 0.7;
/// Below this a regression calls for a lighter load
const REDUCE_SUCCESS_RATE: f64 = 0.5;

// ---------------------------------------------------------------------------
/// Exercise Classification: which increment applies
// ---------------------------------------------------------------------------

pub trait ExerciseClassifier: Send + Sync {
    fn weight_class(&self, exercise_name: &str) -> WeightClass;
}

/// Any `Fn(&str) -> WeightClass` can stand in as a classifier
impl<F> ExerciseClassifier for F
where
    F: Fn(&str) -> WeightClass + Send + Sync,
{
    fn weight_class(&self, exercise_name: &str) -> WeightClass {
        self(exercise_name)
    }
}

/// Case-insensitive substring match against a list of compound lifts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeavyLiftClassifier {
    pub heavy_terms: Vec<String>,
}

impl Default for HeavyLiftClassifier {
    fn default() -> Self {
        Self {
            heavy_terms: [
                "deadlift",
                "squat",
                "bench press",
                "barbell row",
                "hip thrust",
                "leg press",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ExerciseClassifier for HeavyLiftClassifier {
    fn weight_class(&self, exercise_name: &str) -> WeightClass {
        let name = exercise_name.to_lowercase();
        if self
            .heavy_terms
            .iter()
            .any(|term| name.contains(&term.to_lowercase()))
        {
            WeightClass::Heavy
        } else {
            WeightClass::Standard
        }
    }
}

/// Load increment for an exercise's weight class
pub fn weight_increment(config: &SuggestionConfig, weight_class: WeightClass) -> f64 {
    match weight_class {
        WeightClass::Heavy => config.weight_increment_heavy,
        WeightClass::Standard => config.weight_increment,
    }
}

/// Round to the nearest 0.5 unit
pub fn round_to_half(weight: f64) -> f64 {
    (weight * 2.0).round() / 2.0
}

// ---------------------------------------------------------------------------
/// Suggestion Generator: trend + statistics -> next set
// ---------------------------------------------------------------------------

pub fn generate_suggestion(
    stats: &Statistics,
    trend: Trend,
    increment: f64,
    config: &SuggestionConfig,
) -> Suggestion {
    let last_weight = stats.last_weight;
    let last_reps = stats.last_reps;
    // A load that rounds to zero would read as "no data" next time; keep the last one
    let reduced_weight = match round_to_half(last_weight * config.deload_percentage) {
        w if w > 0.0 => w,
        _ => last_weight,
    };

    let (suggestion_type, weight, reps, confidence) = match trend {
        Trend::Progression => {
            if last_reps >= config.target_reps
                && stats.success_rate >= INCREASE_WEIGHT_SUCCESS_RATE
            {
                (
                    SuggestionType::IncreaseWeight,
                    last_weight + increment,
                    config.min_reps_success,
                    Confidence::High,
                )
            } else {
                (
                    SuggestionType::IncreaseReps,
                    last_weight,
                    last_reps.saturating_add(1).min(config.rep_ceiling),
                    Confidence::High,
                )
            }
        }
        Trend::Stagnation => {
            if stats.avg_reps >= config.target_reps.saturating_sub(1) as f64 {
                (
                    SuggestionType::BreakPlateau,
                    last_weight + increment,
                    config.min_reps_success,
                    Confidence::Medium,
                )
            } else if stats.success_rate < DELOAD_SUCCESS_RATE {
                (
                    SuggestionType::Deload,
                    reduced_weight,
                    config.reset_reps,
                    Confidence::Medium,
                )
            } else {
                (
                    SuggestionType::PushReps,
                    last_weight,
                    last_reps.saturating_add(1),
                    Confidence::Medium,
                )
            }
        }
        Trend::Regression => {
            if stats.success_rate < REDUCE_SUCCESS_RATE {
                (
                    SuggestionType::Reduce,
                    reduced_weight,
                    config.reset_reps,
                    Confidence::High,
                )
            } else {
                (
                    SuggestionType::Maintain,
                    last_weight,
                    last_reps,
                    Confidence::Medium,
                )
            }
        }
        Trend::NewWeight => (
            SuggestionType::Consolidate,
            last_weight,
            last_reps,
            Confidence::High,
        ),
        Trend::Inconsistent => (
            SuggestionType::Stabilize,
            last_weight,
            stats.avg_reps.round() as u32,
            Confidence::Low,
        ),
        Trend::InsufficientData => (
            SuggestionType::Repeat,
            last_weight,
            last_reps,
            Confidence::Low,
        ),
    };

    let (emoji, message) = suggestion_text(suggestion_type);

    Suggestion {
        weight,
        reps,
        suggestion_type,
        message: message.to_string(),
        emoji: emoji.to_string(),
        trend,
        confidence,
    }
}

// ---------------------------------------------------------------------------
/// Suggestion Engine: entry point for callers
// ---------------------------------------------------------------------------

pub struct SuggestionEngine<C = HeavyLiftClassifier> {
    config: SuggestionConfig,
    classifier: C,
}

impl SuggestionEngine<HeavyLiftClassifier> {
    pub fn new(config: SuggestionConfig) -> Self {
        Self::with_classifier(config, HeavyLiftClassifier::default())
    }
}

impl<C: ExerciseClassifier> SuggestionEngine<C> {
    pub fn with_classifier(config: SuggestionConfig, classifier: C) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Stored classification wins; otherwise ask the classifier
    pub fn resolve_weight_class(&self, exercise_name: &str, stored: Option<WeightClass>) -> WeightClass {
        stored.unwrap_or_else(|| self.classifier.weight_class(exercise_name))
    }

    /// Suggest the next set at `set_position` for the named exercise.
    ///
    /// Returns `None` when no session yields a usable (non-zero weight) set.
    pub fn analyze_and_suggest(
        &self,
        sessions: &[SessionHistoryEntry],
        set_position: u32,
        exercise_name: &str,
    ) -> Option<Suggestion> {
        let weight_class = self.classifier.weight_class(exercise_name);
        self.suggest_for_class(sessions, set_position, weight_class)
    }

    /// Same as `analyze_and_suggest` with the weight class already known
    pub fn suggest_for_class(
        &self,
        sessions: &[SessionHistoryEntry],
        set_position: u32,
        weight_class: WeightClass,
    ) -> Option<Suggestion> {
        let points = extract_set_history(sessions, set_position, self.config.set_matching);

        let Some(stats) = Statistics::compute(&points, self.config.min_reps_success) else {
            debug!(set_position, sessions = sessions.len(), "no usable history for set");
            return None;
        };

        let trend = detect_trend(&points, self.config.stagnation_sessions);
        let increment = weight_increment(&self.config, weight_class);
        let suggestion = generate_suggestion(&stats, trend, increment, &self.config);

        debug!(
            set_position,
            points = points.len(),
            %trend,
            %weight_class,
            suggestion_type = %suggestion.suggestion_type,
            weight = suggestion.weight,
            reps = suggestion.reps,
            "set suggestion computed"
        );

        Some(suggestion)
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
