//! The [`RefStore`] trait defining the reference storage interface.

use async_trait::async_trait;

use crate::error::RefResult;
use crate::types::Ref;

/// Storage backend for named references.
///
/// Implementations must be thread-safe (`Send + Sync`). Ref updates carry no
/// optimistic-concurrency check: the last writer to a name wins, and callers
/// are expected to serialize writers per branch (see the repository docs).
#[async_trait]
pub trait RefStore: Send + Sync {
    /// Read a ref by name. Returns `Ok(None)` if it does not exist.
    async fn get_ref(&self, name: &str) -> RefResult<Option<Ref>>;

    /// Write (create or update) a ref.
    ///
    /// Validates the name. Tags are immutable: writing over an existing tag
    /// fails with [`RefError::TagImmutable`](crate::RefError::TagImmutable).
    async fn put_ref(&self, reference: &Ref) -> RefResult<()>;

    /// Delete a ref by name. Returns `true` if it existed.
    ///
    /// Deleting the last remaining branch is rejected with
    /// [`RefError::DeleteLastBranch`](crate::RefError::DeleteLastBranch) —
    /// a repository always keeps at least one branch.
    async fn delete_ref(&self, name: &str) -> RefResult<bool>;

    /// List all refs, sorted by name.
    async fn list_refs(&self) -> RefResult<Vec<Ref>>;

    /// List all branch refs, sorted by name.
    async fn branches(&self) -> RefResult<Vec<Ref>> {
        let refs = self.list_refs().await?;
        Ok(refs.into_iter().filter(Ref::is_branch).collect())
    }
}
