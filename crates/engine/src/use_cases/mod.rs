//! Use cases - User story orchestration.
//!
//! `mood` and `reply` wrap the two oracle calls; `conversation` drives a
//! full replay through them.

pub mod conversation;
pub mod mood;
pub mod reply;

// Re-export main types
pub use conversation::{ConversationUseCases, SimulateConversation, SimulationError, SimulationReport};
pub use mood::{ClassificationMode, MoodClassifier, MoodClassifierConfig};
pub use reply::{NpcReply, ReplyGenerator, ReplyGeneratorConfig};
