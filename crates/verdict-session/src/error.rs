use thiserror::Error;
use verdict_repo::RepoError;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Repository failure while flushing or switching branches.
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
