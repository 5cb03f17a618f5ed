//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod chat_completions;
pub mod config;
pub mod log_sink;
pub mod message_source;
pub mod ports;
pub mod progress;
