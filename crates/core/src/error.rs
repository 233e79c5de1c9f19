//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only construction-time checks (identifiers, catalog integrity, settings)
/// produce these. Browsing operations themselves are total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = DomainError::validation("page size must be at least 1");
        assert_eq!(err.to_string(), "validation failed: page size must be at least 1");

        let err = DomainError::not_found("category `lobby`");
        assert_eq!(err.to_string(), "not found: category `lobby`");
    }
}
