//! Deterministic projection of event logs into materialized state.
//!
//! The projection is a pure left fold: [`project`] replays an ordered event
//! sequence from scratch and always yields the same [`DomainState`] for the
//! same input. [`apply`] is the single-event step, exposed so a live session
//! can fold incrementally and still match a full replay.
//!
//! # Design Rules
//!
//! 1. No event is ever rejected. Dangling references (a rename of a removed
//!    criterion, a weight for an id that never existed) are tolerated
//!    silently — the projector reconstructs, it does not validate.
//! 2. Removal cascades: removing an entity also drops every score entry
//!    referencing it, and a removed criterion's weight.
//! 3. Removal leaves no tombstone: re-creating an id afterwards is a fresh,
//!    independent entity.
//! 4. Scores always append. The collection is a history, not a cell.

pub mod project;
pub mod seed;
pub mod state;

pub use project::{apply, project};
pub use seed::{seed_events, SeedCriterion, SeedMatrix, SeedRating, SeedTool};
pub use state::{Criterion, DomainState, ScoreEntry, Tool, DEFAULT_WEIGHT};
