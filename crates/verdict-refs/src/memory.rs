//! In-memory reference store for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{RefError, RefResult};
use crate::names::validate_ref_name;
use crate::traits::RefStore;
use crate::types::Ref;

/// An in-memory implementation of [`RefStore`].
///
/// All data lives in a `HashMap` behind a `RwLock`. Data is lost when the
/// store is dropped.
#[derive(Debug, Default)]
pub struct MemoryRefStore {
    refs: RwLock<HashMap<String, Ref>>,
}

impl MemoryRefStore {
    /// Create a new empty ref store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefStore for MemoryRefStore {
    async fn get_ref(&self, name: &str) -> RefResult<Option<Ref>> {
        let refs = self.refs.read().expect("lock poisoned");
        Ok(refs.get(name).cloned())
    }

    async fn put_ref(&self, reference: &Ref) -> RefResult<()> {
        validate_ref_name(&reference.name)?;

        let mut refs = self.refs.write().expect("lock poisoned");
        if reference.is_tag() {
            if let Some(existing) = refs.get(&reference.name) {
                if existing.is_tag() {
                    return Err(RefError::TagImmutable {
                        name: reference.name.clone(),
                    });
                }
            }
        }
        refs.insert(reference.name.clone(), reference.clone());
        Ok(())
    }

    async fn delete_ref(&self, name: &str) -> RefResult<bool> {
        let mut refs = self.refs.write().expect("lock poisoned");
        let Some(existing) = refs.get(name) else {
            return Ok(false);
        };
        if existing.is_branch() {
            let branch_count = refs.values().filter(|r| r.is_branch()).count();
            if branch_count <= 1 {
                return Err(RefError::DeleteLastBranch {
                    name: name.to_string(),
                });
            }
        }
        Ok(refs.remove(name).is_some())
    }

    async fn list_refs(&self) -> RefResult<Vec<Ref>> {
        let refs = self.refs.read().expect("lock poisoned");
        let mut result: Vec<Ref> = refs.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}
