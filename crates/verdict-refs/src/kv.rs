//! Durable ref store over a [`KvBackend`].
//!
//! The whole ref table is one JSON map (`name` → [`Ref`]) under the single
//! key `<prefix>:refs`. Like the durable object store, this is a best-effort
//! client-side cache: backend failures are logged and treated as an empty
//! table (reads) or a dropped write, favoring availability over durability.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::warn;
use verdict_kv::KvBackend;

use crate::error::{RefError, RefResult};
use crate::names::validate_ref_name;
use crate::traits::RefStore;
use crate::types::Ref;

/// Durable ref store keyed through a pluggable key-value backend.
#[derive(Debug)]
pub struct KvRefStore<B> {
    backend: B,
    prefix: String,
}

impl<B: KvBackend> KvRefStore<B> {
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

    fn refs_key(&self) -> String {
        format!("{}:refs", self.prefix)
    }

    async fn load_table(&self) -> BTreeMap<String, Ref> {
        let key = self.refs_key();
        let raw = match self.backend.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(e) => {
                warn!(key, error = %e, "kv read failed, treating ref table as empty");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(table) => table,
            Err(e) => {
                warn!(key, error = %e, "corrupt ref table, treating as empty");
                BTreeMap::new()
            }
        }
    }

    async fn save_table(&self, table: &BTreeMap<String, Ref>) {
        let key = self.refs_key();
        let raw = match serde_json::to_string(table) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "ref table serialization failed, dropping write");
                return;
            }
        };
        if let Err(e) = self.backend.set(&key, &raw).await {
            warn!(key, error = %e, "kv write failed, dropping ref update");
        }
    }
}

#[async_trait]
impl<B: KvBackend> RefStore for KvRefStore<B> {
    async fn get_ref(&self, name: &str) -> RefResult<Option<Ref>> {
        Ok(self.load_table().await.get(name).cloned())
    }

    async fn put_ref(&self, reference: &Ref) -> RefResult<()> {
        validate_ref_name(&reference.name)?;

        let mut table = self.load_table().await;
        if reference.is_tag() {
            if let Some(existing) = table.get(&reference.name) {
                if existing.is_tag() {
                    return Err(RefError::TagImmutable {
                        name: reference.name.clone(),
                    });
                }
            }
        }
        table.insert(reference.name.clone(), reference.clone());
        self.save_table(&table).await;
        Ok(())
    }

    async fn delete_ref(&self, name: &str) -> RefResult<bool> {
        let mut table = self.load_table().await;
        let Some(existing) = table.get(name) else {
            return Ok(false);
        };
        if existing.is_branch() {
            let branch_count = table.values().filter(|r| r.is_branch()).count();
            if branch_count <= 1 {
                return Err(RefError::DeleteLastBranch {
                    name: name.to_string(),
                });
            }
        }
        let removed = table.remove(name).is_some();
        self.save_table(&table).await;
        Ok(removed)
    }

    async fn list_refs(&self) -> RefResult<Vec<Ref>> {
        // BTreeMap iteration is already name-sorted.
        Ok(self.load_table().await.into_values().collect())
    }
}
