//! moodsim Engine library.
//!
//! Replays a log of player messages to an NPC, classifying each player's mood
//! and generating mood-conditioned replies through a chat-completions LLM.
//!
//! ## Structure
//!
//! - `use_cases/` - Mood classification, reply generation, conversation replay
//! - `stores/` - Per-run session state
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `prompt_templates` - Prompt defaults and overrides
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod prompt_templates;
pub mod stores;
pub mod use_cases;

/// Test doubles shared by use case tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
