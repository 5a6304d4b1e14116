use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use verdict_types::{Commit, CommitId, Event, EventId};

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// In-memory, `HashMap`-based object store.
///
/// Intended for tests and ephemeral sessions. Objects are held behind
/// `RwLock`s and cloned on read.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    events: RwLock<HashMap<EventId, Event>>,
    commits: RwLock<HashMap<CommitId, Commit>>,
}

impl MemoryObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events currently stored.
    pub fn event_count(&self) -> usize {
        self.events.read().expect("lock poisoned").len()
    }

    /// Number of commits currently stored.
    pub fn commit_count(&self) -> usize {
        self.commits.read().expect("lock poisoned").len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_event(&self, id: &EventId) -> StoreResult<Option<Event>> {
        let events = self.events.read().expect("lock poisoned");
        Ok(events.get(id).cloned())
    }

    async fn put_event(&self, event: &Event) -> StoreResult<()> {
        let mut events = self.events.write().expect("lock poisoned");
        // Idempotent: the first write of an id wins, later writes are no-ops.
        events.entry(event.id).or_insert_with(|| event.clone());
        Ok(())
    }

    async fn get_commit(&self, id: &CommitId) -> StoreResult<Option<Commit>> {
        let commits = self.commits.read().expect("lock poisoned");
        Ok(commits.get(id).cloned())
    }

    async fn put_commit(&self, commit: &Commit) -> StoreResult<()> {
        let computed = commit.compute_id();
        if computed != commit.id {
            return Err(StoreError::IdMismatch {
                claimed: commit.id.to_hex(),
                computed: computed.to_hex(),
            });
        }
        let mut commits = self.commits.write().expect("lock poisoned");
        commits.entry(commit.id).or_insert_with(|| commit.clone());
        Ok(())
    }
}
