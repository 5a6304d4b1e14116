//! Named reference management for Verdict.
//!
//! References are the only mutable pointers in the system: a branch ref
//! advances as commits land, everything it points at is immutable. Tags are
//! write-once.
//!
//! # Storage Backends
//!
//! All backends implement the [`RefStore`] trait:
//!
//! - [`MemoryRefStore`] — `HashMap`-based, for tests and ephemeral sessions
//! - [`KvRefStore`] — durable store over any [`verdict_kv::KvBackend`],
//!   the whole ref table as one JSON map under `<prefix>:refs`

pub mod error;
pub mod kv;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, RefResult};
pub use kv::KvRefStore;
pub use memory::MemoryRefStore;
pub use names::validate_ref_name;
pub use traits::RefStore;
pub use types::{Ref, RefKind};
