//! Durable object store over a [`KvBackend`].
//!
//! Layout: one JSON blob per object under `<prefix>:obj:<id>`. Event ids
//! (UUIDs) and commit ids (hex hashes) cannot collide, so both kinds share
//! the `obj` namespace.
//!
//! This backend is a best-effort client-side cache, not a system of record:
//! read and write failures are logged via `tracing` and treated as if the
//! value were absent (reads) or the write were a no-op, favoring
//! availability over durability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use verdict_kv::KvBackend;
use verdict_types::{Commit, CommitId, Event, EventId};

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// Envelope distinguishing the two object kinds inside a JSON blob.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ObjectRecord {
    Event { event: Event },
    Commit { commit: Commit },
}

/// Durable object store keyed through a pluggable key-value backend.
#[derive(Debug)]
pub struct KvObjectStore<B> {
    backend: B,
    prefix: String,
}

impl<B: KvBackend> KvObjectStore<B> {
    /// Create a store writing under `prefix`.
    pub fn new(backend: B, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// The underlying key-value backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn object_key(&self, id: &str) -> String {
        format!("{}:obj:{}", self.prefix, id)
    }

    async fn load(&self, id: &str) -> Option<ObjectRecord> {
        let key = self.object_key(id);
        let raw = match self.backend.get(&key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "kv read failed, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, error = %e, "corrupt object record, treating as absent");
                None
            }
        }
    }

    async fn save(&self, id: &str, record: &ObjectRecord) {
        let key = self.object_key(id);
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "object serialization failed, dropping write");
                return;
            }
        };
        if let Err(e) = self.backend.set(&key, &raw).await {
            warn!(key, error = %e, "kv write failed, dropping write");
        }
    }
}

#[async_trait]
impl<B: KvBackend> ObjectStore for KvObjectStore<B> {
    async fn get_event(&self, id: &EventId) -> StoreResult<Option<Event>> {
        match self.load(&id.to_string()).await {
            Some(ObjectRecord::Event { event }) => Ok(Some(event)),
            _ => Ok(None),
        }
    }

    async fn put_event(&self, event: &Event) -> StoreResult<()> {
        let id = event.id.to_string();
        // Idempotent: the object is immutable, skip if already stored.
        if self.load(&id).await.is_none() {
            self.save(
                &id,
                &ObjectRecord::Event {
                    event: event.clone(),
                },
            )
            .await;
        }
        Ok(())
    }

    async fn get_commit(&self, id: &CommitId) -> StoreResult<Option<Commit>> {
        match self.load(&id.to_hex()).await {
            Some(ObjectRecord::Commit { commit }) => Ok(Some(commit)),
            _ => Ok(None),
        }
    }

    async fn put_commit(&self, commit: &Commit) -> StoreResult<()> {
        let id = commit.id.to_hex();
        if self.load(&id).await.is_none() {
            self.save(
                &id,
                &ObjectRecord::Commit {
                    commit: commit.clone(),
                },
            )
            .await;
        }
        Ok(())
    }
}
