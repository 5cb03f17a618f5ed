//! Value objects - Immutable objects defined by their attributes

mod history;
mod mood_assessment;

pub use history::HistoryBuffer;
pub use mood_assessment::{MoodAssessment, FALLBACK_REASON, NO_REASON_PROVIDED};
