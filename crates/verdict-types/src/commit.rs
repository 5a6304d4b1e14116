use serde::{Deserialize, Serialize};

use crate::id::{CommitId, EventId};
use crate::temporal::Timestamp;

/// An immutable bundle of events with parent pointers.
///
/// Commits form a DAG: zero parents for a root commit, one for a normal
/// commit, two for a merge. Every event id appears in exactly the commit
/// that first introduced it, and events must already be in the object store
/// before the commit referencing them is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Content-addressed id over all the fields below.
    pub id: CommitId,
    /// Parent commit ids. `[target, source]` for a merge (order is for
    /// audit display, not correctness).
    pub parents: Vec<CommitId>,
    /// Ids of the events this commit introduces, in writer order.
    pub events: Vec<EventId>,
    /// Identifier of the committing user.
    pub author: String,
    /// When the commit was created.
    pub timestamp: Timestamp,
    /// Optional free-text comment.
    pub message: Option<String>,
}

impl Commit {
    /// Build a commit, computing its content-addressed id.
    pub fn build(
        parents: Vec<CommitId>,
        events: Vec<EventId>,
        author: impl Into<String>,
        timestamp: Timestamp,
        message: Option<String>,
    ) -> Self {
        let author = author.into();
        let id = compute_id(&parents, &events, &author, timestamp, message.as_deref());
        Self {
            id,
            parents,
            events,
            author,
            timestamp,
            message,
        }
    }

    /// Recompute the id from the commit's content.
    pub fn compute_id(&self) -> CommitId {
        compute_id(
            &self.parents,
            &self.events,
            &self.author,
            self.timestamp,
            self.message.as_deref(),
        )
    }

    /// Returns `true` if this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if this commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }
}

/// Hash the commit fields into a content-addressed id.
///
/// Field boundaries are length-prefixed so that, e.g., shifting bytes
/// between author and message cannot collide.
fn compute_id(
    parents: &[CommitId],
    events: &[EventId],
    author: &str,
    timestamp: Timestamp,
    message: Option<&str>,
) -> CommitId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(parents.len() as u64).to_le_bytes());
    for parent in parents {
        hasher.update(parent.as_bytes());
    }
    hasher.update(&(events.len() as u64).to_le_bytes());
    for event in events {
        hasher.update(event.as_uuid().as_bytes());
    }
    hasher.update(&(author.len() as u64).to_le_bytes());
    hasher.update(author.as_bytes());
    hasher.update(&timestamp.wall_ms.to_le_bytes());
    hasher.update(&timestamp.seq.to_le_bytes());
    match message {
        Some(msg) => {
            hasher.update(&[1]);
            hasher.update(msg.as_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    CommitId::from_hash(*hasher.finalize().as_bytes())
}
