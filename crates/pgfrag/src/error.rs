//! Error types for pgfrag

use thiserror::Error;

/// Result type alias for fragment builders
pub type FragResult<T> = Result<T, FragError>;

/// Errors raised while building a fragment.
///
/// All variants except [`FragError::Config`] are caused by the caller's input
/// and are raised before any fragment text exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragError {
    /// Partial update received no fields
    #[error("No data: an update needs at least one field")]
    EmptyUpdate,

    /// Lower bound of a range filter is greater than its upper bound
    #[error("Invalid range: minimum {min} exceeds maximum {max}")]
    InvalidRange { min: i64, max: i64 },

    /// A resolved column name is not a safe SQL identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// An update field carried an array or object instead of a scalar
    #[error("Non-scalar value for field `{field}`")]
    NonScalar { field: String },

    /// Mapping configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl FragError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error should be surfaced as a bad client request
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Check if this is an empty update error
    pub fn is_empty_update(&self) -> bool {
        matches!(self, Self::EmptyUpdate)
    }

    /// Check if this is a non-scalar value error
    pub fn is_non_scalar(&self) -> bool {
        matches!(self, Self::NonScalar { .. })
    }

    /// Check if this is an invalid range error
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }
}
