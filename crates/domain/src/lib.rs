//! moodsim Domain - types and invariants for the NPC mood simulator.
//!
//! Everything here is pure: no I/O, no async. The engine crate owns the
//! oracle calls and the file plumbing.

extern crate self as moodsim_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod types;
pub mod value_objects;

pub use entities::{replay_order, LogEntry, PlayerMessage, PlayerSession, TimedMessage};
pub use error::DomainError;
pub use ids::PlayerId;
pub use types::{Mood, MoodIntensity};
pub use value_objects::{HistoryBuffer, MoodAssessment, FALLBACK_REASON, NO_REASON_PROVIDED};
