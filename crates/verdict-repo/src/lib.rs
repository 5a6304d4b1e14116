//! The Verdict repository.
//!
//! [`Repository`] orchestrates an [`ObjectStore`](verdict_store::ObjectStore)
//! and a [`RefStore`](verdict_refs::RefStore) into the git-like surface:
//! commit, checkout, log, fork, diff, and merge over a commit DAG.
//!
//! # Concurrency model
//!
//! Single writer per branch, cooperatively. The repository performs no
//! locking and no internal parallelism; all store operations are awaited
//! sequentially. Two concurrent commits to the same branch name from the
//! same process can silently drop one writer's ref update (last write
//! wins) — callers serialize per branch, typically through a session.

pub mod error;
pub mod repository;

pub use error::{RepoError, RepoResult};
pub use repository::Repository;

// Re-exported so repository consumers need only this crate.
pub use verdict_diff::BranchDiff;
pub use verdict_merge::MergeStrategy;
