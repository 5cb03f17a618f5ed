//! # moodsim Domain Types
//!
//! Shared vocabulary types that form the innermost layer of the crate.
//!
//! ## Design Principles
//!
//! 1. **Pure data types** - No I/O, no async, no side effects
//! 2. **Serializable** - All types derive Serialize/Deserialize

// Mood types (player tone toward the NPC)
mod mood;
pub use mood::{Mood, MoodIntensity};
