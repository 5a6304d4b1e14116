use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::KvResult;
use crate::KvBackend;

/// In-memory, `HashMap`-based key-value backend.
///
/// Intended for tests and ephemeral sessions. Data is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKv {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

#[async_trait]
impl KvBackend for MemoryKv {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let entries = self.entries.read().expect("lock poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut entries = self.entries.write().expect("lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KvResult<bool> {
        let mut entries = self.entries.write().expect("lock poisoned");
        Ok(entries.remove(key).is_some())
    }
}
