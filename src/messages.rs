//! Message table and display formatting for suggestions
//!
//! Wording is presentation only; callers switch on `SuggestionType`.

use serde::{Deserialize, Serialize};

use crate::models::{Suggestion, SuggestionType, Trend};

/// Fixed emoji and message for each suggestion type
pub fn suggestion_text(suggestion_type: SuggestionType) -> (&'static str, &'static str) {
  match suggestion_type {
    SuggestionType::IncreaseWeight => ("🚀", "Rep target hit consistently. Time to add weight."),
    SuggestionType::IncreaseReps => ("📈", "You're progressing. Go for one more rep."),
    SuggestionType::BreakPlateau => ("💥", "Plateau near the rep target. Break it with more weight."),
    SuggestionType::Deload => ("🔄", "Stuck for a while. Deload and build back up."),
    SuggestionType::PushReps => ("💪", "Holding steady. Push for one extra rep."),
    SuggestionType::Reduce => ("⚠️", "Performance is dropping. Lighten the load and recover."),
    SuggestionType::Maintain => ("⚖️", "Slight dip. Keep the same weight and reps."),
    SuggestionType::Consolidate => ("🎯", "New weight. Consolidate before pushing further."),
    SuggestionType::Stabilize => ("📊", "Results vary. Aim for consistent reps at this weight."),
    SuggestionType::Repeat => ("🔁", "Not enough history yet. Repeat your last set."),
  }
}

/// Human-readable trend label
pub fn trend_label(trend: Trend) -> &'static str {
  match trend {
    Trend::InsufficientData => "Not enough data",
    Trend::NewWeight => "New weight",
    Trend::Progression => "Progressing",
    Trend::Regression => "Declining",
    Trend::Stagnation => "Plateau",
    Trend::Inconsistent => "Inconsistent",
  }
}

/// Presentation-ready view of a suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionDisplay {
  /// e.g. "62.5 kg × 8"
  pub primary: String,
  pub message: String,
  pub emoji: String,
  pub trend_label: String,
  #[serde(rename = "type")]
  pub suggestion_type: String,
}

pub fn format_suggestion_message(suggestion: &Suggestion, unit: &str) -> SuggestionDisplay {
  SuggestionDisplay {
    primary: format!("{} {} × {}", format_weight(suggestion.weight), unit, suggestion.reps),
    message: suggestion.message.clone(),
    emoji: suggestion.emoji.clone(),
    trend_label: trend_label(suggestion.trend).to_string(),
    suggestion_type: suggestion.suggestion_type.to_string(),
  }
}

/// Whole numbers without decimals, otherwise one decimal place
pub fn format_weight(weight: f64) -> String {
  if weight.fract().abs() < f64::EPSILON {
    format!("{:.0}", weight)
  } else {
    format!("{:.1}", weight)
  }
}
