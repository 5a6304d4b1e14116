//! Object storage for Verdict.
//!
//! The object store holds the two immutable object kinds — events and
//! commits — keyed by their own identifiers, analogous to git's
//! `.git/objects/` directory.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`MemoryObjectStore`] — `HashMap`-based store for tests and ephemeral
//!   sessions
//! - [`KvObjectStore`] — durable store over any [`verdict_kv::KvBackend`],
//!   one JSON blob per object under `<prefix>:obj:<id>`
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written; re-storing an object with the same
//!    id is a no-op.
//! 2. Events referenced by a commit must be written before the commit is.
//!    The store does not police this — the repository does.
//! 3. The durable backend favors availability over durability: storage
//!    failures are logged and treated as absent values, never surfaced.

pub mod error;
pub mod kv;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use kv::KvObjectStore;
pub use memory::MemoryObjectStore;
pub use traits::ObjectStore;
