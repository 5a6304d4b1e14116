use thiserror::Error;

/// Errors from parsing or validating foundation types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A decoded value had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A UUID string could not be parsed.
    #[error("invalid uuid: {0}")]
    InvalidUuid(String),
}
