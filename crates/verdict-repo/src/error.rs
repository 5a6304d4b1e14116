use thiserror::Error;
use verdict_refs::RefError;
use verdict_store::StoreError;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// An operation named a branch that has no ref.
    #[error("branch not found: {name}")]
    BranchNotFound { name: String },

    /// Object store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Ref store failure.
    #[error(transparent)]
    Ref(#[from] RefError),
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;
