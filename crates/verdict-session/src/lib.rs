//! The live editing session for Verdict.
//!
//! A [`Session`] sits between a command layer and the repository. Dispatched
//! events are applied to the in-memory projection immediately (optimistic,
//! synchronous) and buffered in a pending queue; the queue is flushed to
//! `Repository::commit` explicitly or on a debounce timer that coalesces
//! bursts of rapid edits into one commit.
//!
//! A process crash before flush loses the pending tail. That trade is
//! deliberate: the live state stays snappy, and everything already committed
//! is durable.

pub mod error;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use session::Session;
