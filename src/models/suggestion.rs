use serde::{Deserialize, Serialize};

use crate::models::workout::SetInput;

/// ---------------------------------------------------------------------------
/// Trend: trajectory of the last few sessions for one set position
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
  InsufficientData,
  /// Load went up in the newest session
  NewWeight,
  Progression,
  Regression,
  Stagnation,
  Inconsistent,
}

impl Trend {
  pub fn as_str(&self) -> &'static str {
    match self {
      Trend::InsufficientData => "insufficient_data",
      Trend::NewWeight => "new_weight",
      Trend::Progression => "progression",
      Trend::Regression => "regression",
      Trend::Stagnation => "stagnation",
      Trend::Inconsistent => "inconsistent",
    }
  }
}

impl std::fmt::Display for Trend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Trend {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "insufficient_data" => Ok(Self::InsufficientData),
      "new_weight" => Ok(Self::NewWeight),
      "progression" => Ok(Self::Progression),
      "regression" => Ok(Self::Regression),
      "stagnation" => Ok(Self::Stagnation),
      "inconsistent" => Ok(Self::Inconsistent),
      _ => Err(format!("Unknown trend: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Suggestion Type: what the lifter is asked to do next
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
  IncreaseWeight,
  IncreaseReps,
  BreakPlateau,
  Deload,
  PushReps,
  Reduce,
  Maintain,
  Consolidate,
  Stabilize,
  Repeat,
}

impl SuggestionType {
  pub fn as_str(&self) -> &'static str {
    match self {
      SuggestionType::IncreaseWeight => "increase_weight",
      SuggestionType::IncreaseReps => "increase_reps",
      SuggestionType::BreakPlateau => "break_plateau",
      SuggestionType::Deload => "deload",
      SuggestionType::PushReps => "push_reps",
      SuggestionType::Reduce => "reduce",
      SuggestionType::Maintain => "maintain",
      SuggestionType::Consolidate => "consolidate",
      SuggestionType::Stabilize => "stabilize",
      SuggestionType::Repeat => "repeat",
    }
  }
}

impl std::fmt::Display for SuggestionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for SuggestionType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "increase_weight" => Ok(Self::IncreaseWeight),
      "increase_reps" => Ok(Self::IncreaseReps),
      "break_plateau" => Ok(Self::BreakPlateau),
      "deload" => Ok(Self::Deload),
      "push_reps" => Ok(Self::PushReps),
      "reduce" => Ok(Self::Reduce),
      "maintain" => Ok(Self::Maintain),
      "consolidate" => Ok(Self::Consolidate),
      "stabilize" => Ok(Self::Stabilize),
      "repeat" => Ok(Self::Repeat),
      _ => Err(format!("Unknown suggestion type: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
  High,
  Medium,
  Low,
}

impl std::fmt::Display for Confidence {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::High => write!(f, "high"),
      Self::Medium => write!(f, "medium"),
      Self::Low => write!(f, "low"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Weight Class: decides the load increment for an exercise
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
  #[default]
  Standard,
  /// Compound lifts that take larger jumps (squat, deadlift, ...)
  Heavy,
}

impl std::fmt::Display for WeightClass {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Standard => write!(f, "standard"),
      Self::Heavy => write!(f, "heavy"),
    }
  }
}

impl std::str::FromStr for WeightClass {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "standard" => Ok(Self::Standard),
      "heavy" => Ok(Self::Heavy),
      _ => Err(format!("Unknown weight class: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Suggestion: the engine's output for one set
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
  pub weight: f64,
  pub reps: u32,
  #[serde(rename = "type")]
  pub suggestion_type: SuggestionType,
  pub message: String,
  pub emoji: String,
  pub trend: Trend,
  pub confidence: Confidence,
}

impl Suggestion {
  /// Values used to prefill the set inputs when the lifter accepts the suggestion
  pub fn as_set_input(&self) -> SetInput {
    SetInput {
      weight: self.weight,
      reps: self.reps,
    }
  }
}
