use async_trait::async_trait;
use verdict_types::{Commit, CommitId, Event, EventId};

use crate::error::StoreResult;

/// Storage for the two immutable object kinds: events and commits.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written; a second `put` with the same id is
///   a no-op.
/// - Concurrent reads are always safe.
/// - The store never interprets relationships between objects — commit
///   parent pointers and event references are the repository's concern.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read an event by id. Returns `Ok(None)` if absent.
    async fn get_event(&self, id: &EventId) -> StoreResult<Option<Event>>;

    /// Write an event. Idempotent: re-storing the same id is a no-op.
    async fn put_event(&self, event: &Event) -> StoreResult<()>;

    /// Read a commit by id. Returns `Ok(None)` if absent.
    async fn get_commit(&self, id: &CommitId) -> StoreResult<Option<Commit>>;

    /// Write a commit. Idempotent: re-storing the same id is a no-op.
    async fn put_commit(&self, commit: &Commit) -> StoreResult<()>;

    /// Read multiple events, preserving input order.
    ///
    /// Absent ids are silently skipped — replay favors availability over
    /// completeness when a durable backend has lost an object.
    async fn get_events(&self, ids: &[EventId]) -> StoreResult<Vec<Event>> {
        let mut events = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(event) = self.get_event(id).await? {
                events.push(event);
            }
        }
        Ok(events)
    }
}
