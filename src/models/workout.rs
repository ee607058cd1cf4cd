use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoachError;
use crate::models::suggestion::WeightClass;

/// One completed set as logged by the workout flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
  /// 1-based position of the set within its session
  pub set_number: u32,
  pub weight: f64,
  pub reps: u32,
}

impl PerformanceRecord {
  pub fn new(set_number: u32, weight: f64, reps: u32) -> Self {
    Self {
      set_number,
      weight,
      reps,
    }
  }

  /// Build a record from raw database values, rejecting anything the
  /// engine cannot reason about (negative load or reps, set numbers below 1)
  pub fn from_raw(set_number: i64, weight: f64, reps: i64) -> Result<Self, CoachError> {
    let set_number = u32::try_from(set_number)
      .ok()
      .filter(|n| *n >= 1)
      .ok_or_else(|| CoachError::InvalidRecord(format!("set number {} is not >= 1", set_number)))?;

    if !weight.is_finite() || weight < 0.0 {
      return Err(CoachError::InvalidRecord(format!(
        "weight {} is not a non-negative number",
        weight
      )));
    }

    let reps = u32::try_from(reps)
      .map_err(|_| CoachError::InvalidRecord(format!("reps {} is not non-negative", reps)))?;

    Ok(Self::new(set_number, weight, reps))
  }
}

/// One past session restricted to a single exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHistoryEntry {
  pub session_id: i64,
  /// Used for ordering and display only
  pub date: DateTime<Utc>,
  /// Insertion order = set order within the session
  pub sets: Vec<PerformanceRecord>,
}

/// Weight and reps as entered (or prefilled) in the caller's set inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetInput {
  pub weight: f64,
  pub reps: u32,
}

impl SetInput {
  pub fn validate(&self) -> Result<(), CoachError> {
    if !self.weight.is_finite() || self.weight < 0.0 {
      return Err(CoachError::InvalidRecord(format!(
        "weight {} is not a non-negative number",
        self.weight
      )));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
  pub id: i64,
  pub name: String,
  /// Stored classification; `None` defers to the name-based classifier
  pub weight_class: Option<WeightClass>,
}
