//! Error model.

use thiserror::Error;

/// Result type used for construction and configuration checks.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised when a value or a configuration fails validation. Lookup failures
/// are reported separately through [`SourceError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Failure reported by an order or cost lookup.
///
/// Callers on the rendering path treat every variant as "no data"; the
/// distinction only matters for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing store could not be reached or is in a broken state.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// A record exists but could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl SourceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}
