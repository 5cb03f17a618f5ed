//! Common utility functions for the domain layer.
//!
//! Pure functions only - no side effects, no I/O.

pub mod datetime;

pub use datetime::parse_timestamp;
