pub mod workout;
pub mod suggestion;

pub use workout::{Exercise, PerformanceRecord, SessionHistoryEntry, SetInput};
pub use suggestion::{Confidence, Suggestion, SuggestionType, Trend, WeightClass};
