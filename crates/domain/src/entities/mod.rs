//! Domain entities - Core business objects with identity

mod log_entry;
mod message;
mod player_session;

pub use log_entry::LogEntry;
pub use message::{replay_order, PlayerMessage, TimedMessage};
pub use player_session::PlayerSession;
