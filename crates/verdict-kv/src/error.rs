use thiserror::Error;

/// Errors from key-value backend operations.
#[derive(Debug, Error)]
pub enum KvError {
    /// I/O failure in the underlying storage.
    #[error("kv I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be decoded.
    #[error("kv corrupt value at {key}: {reason}")]
    CorruptValue { key: String, reason: String },
}

/// Result alias for key-value operations.
pub type KvResult<T> = Result<T, KvError>;
