//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction and parsing,
//! so adapters never have to fall back to `String` errors.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for invariant violations.
    ///
    /// Use this when a value object cannot be built from the given input:
    /// - Capacities or sizes that are out of range
    /// - Required fields that are empty
    ///
    /// # Example
    /// ```ignore
    /// if capacity == 0 {
    ///     return Err(DomainError::validation("history capacity must be at least 1"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations and timestamp parsing when the
    /// input doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("history capacity must be at least 1");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: history capacity must be at least 1"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown mood: 'sad'");
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("sad"));
    }
}
