//! In-memory state storage modules.
//!
//! Stores manage runtime state that lives only for one run:
//! - `SessionStore` - Per-player history and mood

pub mod session;

// Re-export store types
pub use session::SessionStore;
