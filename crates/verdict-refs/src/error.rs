//! Error types for reference operations.

use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The reference was not found.
    #[error("ref not found: {name}")]
    NotFound { name: String },

    /// The ref name is invalid.
    #[error("invalid ref name: {name}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A tag is immutable and cannot be updated.
    #[error("tag is immutable: {name}")]
    TagImmutable { name: String },

    /// Cannot delete the last remaining branch.
    #[error("cannot delete last branch: {name}")]
    DeleteLastBranch { name: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience type alias for ref operations.
pub type RefResult<T> = Result<T, RefError>;
