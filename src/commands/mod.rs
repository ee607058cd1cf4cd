pub mod suggestion;

pub use suggestion::{
  get_performance_history, record_completed_set, suggest_next_set, suggest_session_plan,
  PlannedSet, SuggestionRequest,
};
