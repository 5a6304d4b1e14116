use verdict_types::CommitId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A commit referenced during an ancestry walk is not in the store.
    #[error("missing commit: {0}")]
    MissingCommit(CommitId),

    /// A commit's stored id does not match its content hash.
    #[error("commit id mismatch: claimed {claimed}, computed {computed}")]
    IdMismatch { claimed: String, computed: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
