//! String key-value backend capability for Verdict durable storage.
//!
//! The durable object and ref stores persist JSON blobs under flat string
//! keys (`<prefix>:obj:<id>`, `<prefix>:refs`). This crate defines the
//! [`KvBackend`] seam they plug into, plus two implementations:
//!
//! - [`MemoryKv`] — `HashMap`-based, for tests and ephemeral sessions
//! - [`FileKv`] — one file per key inside a directory, for local persistence
//!
//! Backends propagate their errors; availability-over-durability policy
//! (swallowing failures as absent values) is applied by the callers in
//! `verdict-store` and `verdict-refs`, not here.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{KvError, KvResult};
pub use file::FileKv;
pub use memory::MemoryKv;

use async_trait::async_trait;

/// Asynchronous string key-value storage.
///
/// All operations may suspend on I/O. Implementations must be thread-safe;
/// callers serialize writes to a given key themselves.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the value stored at `key`. Returns `Ok(None)` when absent.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Write (create or replace) the value at `key`.
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Delete the value at `key`. Returns `true` if it existed.
    async fn remove(&self, key: &str) -> KvResult<bool>;
}
