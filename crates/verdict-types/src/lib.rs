//! Foundation types for Verdict.
//!
//! This crate provides the identity, temporal, and record types shared by
//! every other Verdict crate. Nothing here has behavior beyond construction
//! and formatting: the event vocabulary is pure data, the projection over it
//! lives in `verdict-projection`, and storage lives in `verdict-store`.
//!
//! # Key Types
//!
//! - [`EventId`] — UUID v7 identifier for a single event (time-ordered)
//! - [`CommitId`] — Content-addressed commit identifier (BLAKE3 hash)
//! - [`Timestamp`] / [`Clock`] — Per-writer monotonic logical timestamps
//! - [`Event`] / [`EventKind`] — The append-only edit vocabulary
//! - [`Commit`] — Immutable bundle of event ids with parent pointers
//! - [`ScaleConfig`] / [`MatrixConfig`] — Scoring scale configuration

pub mod commit;
pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod temporal;

pub use commit::Commit;
pub use config::{MatrixConfig, ScaleConfig};
pub use error::TypeError;
pub use event::{Event, EventKind};
pub use id::{CommitId, EventId};
pub use temporal::{Clock, Timestamp};
