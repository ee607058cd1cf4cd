//! Deterministic analysis layer for set history
//!
//! Reduces recent sessions of one exercise to per-set-position points,
//! aggregates them into statistics, and classifies the trend. Everything
//! here is pure: the suggestion generator interprets these results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SetMatching;
use crate::models::{SessionHistoryEntry, Trend};

/// Sessions considered for pairwise trend comparison
pub const TREND_WINDOW: usize = 3;

/// ---------------------------------------------------------------------------
/// Stage 1: Set History Points
/// ---------------------------------------------------------------------------

/// The performance at one set position in one past session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetHistoryPoint {
  pub date: DateTime<Utc>,
  pub weight: f64,
  pub reps: u32,
}

/// Pick the set at `set_position` from each session, newest first.
///
/// Sessions without a usable set, or whose set carries no weight, are
/// dropped rather than replaced with a zero entry.
pub fn extract_set_history(
  sessions: &[SessionHistoryEntry],
  set_position: u32,
  matching: SetMatching,
) -> Vec<SetHistoryPoint> {
  sessions
    .iter()
    .filter_map(|session| {
      let exact = session.sets.iter().find(|s| s.set_number == set_position);
      let record = match matching {
        SetMatching::ExactOrFirst => exact.or_else(|| session.sets.first()),
        SetMatching::ExactOnly => exact,
      }?;

      if record.weight > 0.0 {
        Some(SetHistoryPoint {
          date: session.date,
          weight: record.weight,
          reps: record.reps,
        })
      } else {
        None
      }
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Stage 2: Statistics
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
  pub avg_weight: f64,
  pub avg_reps: f64,
  pub max_weight: f64,
  pub max_reps: u32,
  pub min_reps: u32,

  /// Values from the newest session
  pub last_weight: f64,
  pub last_reps: u32,

  /// Fraction of sessions that reached `min_reps_success`
  pub success_rate: f64,

  /// Population variances
  pub weight_variance: f64,
  pub reps_variance: f64,

  pub sessions: usize,
}

impl Statistics {
  /// Compute statistics over points ordered newest first. `None` when empty.
  pub fn compute(points: &[SetHistoryPoint], min_reps_success: u32) -> Option<Self> {
    let last = points.first()?;
    let n = points.len() as f64;

    let weights: Vec<f64> = points.iter().map(|p| p.weight).collect();
    let reps: Vec<f64> = points.iter().map(|p| p.reps as f64).collect();

    let successes = points.iter().filter(|p| p.reps >= min_reps_success).count();

    Some(Self {
      avg_weight: mean(&weights),
      avg_reps: mean(&reps),
      max_weight: weights.iter().copied().fold(f64::MIN, f64::max),
      max_reps: points.iter().map(|p| p.reps).max().unwrap_or(0),
      min_reps: points.iter().map(|p| p.reps).min().unwrap_or(0),
      last_weight: last.weight,
      last_reps: last.reps,
      success_rate: successes as f64 / n,
      weight_variance: population_variance(&weights),
      reps_variance: population_variance(&reps),
      sessions: points.len(),
    })
  }
}

fn mean(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  values.iter().sum::<f64>() / values.len() as f64
}

/// Mean squared deviation; 0 for fewer than two values
pub fn population_variance(values: &[f64]) -> f64 {
  if values.len() < 2 {
    return 0.0;
  }
  let avg = mean(values);
  values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// ---------------------------------------------------------------------------
/// Stage 3: Trend Detection
/// ---------------------------------------------------------------------------

/// Classify the trajectory of points ordered newest first.
///
/// Priority: insufficient data, then a fresh load increase, then the
/// multi-session plateau check, then the pairwise rep pattern.
pub fn detect_trend(points: &[SetHistoryPoint], stagnation_sessions: usize) -> Trend {
  if points.len() < 2 {
    return Trend::InsufficientData;
  }

  let recent = &points[..points.len().min(TREND_WINDOW)];

  // Reps usually drop right after a load jump; don't read that as regression
  let weights_vary = recent.iter().any(|p| !same_weight(p.weight, recent[0].weight));
  if weights_vary && recent[0].weight > recent[1].weight {
    return Trend::NewWeight;
  }

  let is_progressing = recent.windows(2).all(|w| w[0].reps > w[1].reps);
  let is_regressing = recent.windows(2).all(|w| w[0].reps < w[1].reps);
  let is_stagnant = recent.windows(2).all(|w| w[0].reps.abs_diff(w[1].reps) <= 1);

  if is_plateau(points, stagnation_sessions) {
    return Trend::Stagnation;
  }

  if is_progressing {
    Trend::Progression
  } else if is_regressing {
    Trend::Regression
  } else if is_stagnant {
    Trend::Stagnation
  } else {
    Trend::Inconsistent
  }
}

/// Same weight for the newest `sessions` points with reps variance below 1
fn is_plateau(points: &[SetHistoryPoint], sessions: usize) -> bool {
  if sessions == 0 || points.len() < sessions {
    return false;
  }
  let window = &points[..sessions];
  let flat_weight = window.iter().all(|p| same_weight(p.weight, window[0].weight));
  let reps: Vec<f64> = window.iter().map(|p| p.reps as f64).collect();

  flat_weight && population_variance(&reps) < 1.0
}

fn same_weight(a: f64, b: f64) -> bool {
  (a - b).abs() < f64::EPSILON
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
