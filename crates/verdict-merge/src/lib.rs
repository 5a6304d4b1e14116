//! Merge engine for Verdict.
//!
//! A merge creates a two-parent commit reconciling the source branch's
//! events into the target. The unique-event computation here is plain set
//! subtraction by event id ("what is missing from target"), deliberately
//! simpler than the diff engine's LCA-relative change sets — merge does not
//! need to know where the branches forked, only what to carry over.
//!
//! No strategy detects conflicts. `Manual` has the same mechanics as
//! `Theirs`; the caller is responsible for having already resolved
//! conflicting edits on the source branch before merging.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use verdict_dag::collect_event_ids;
use verdict_store::{ObjectStore, StoreResult};
use verdict_types::{Commit, CommitId, Timestamp};

/// How branch-unique events are reconciled into the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Keep the target as-is. The merge commit carries zero new events but
    /// records both parents, preserving DAG shape and audit trail.
    Ours,
    /// Append all source-only events to the target.
    Theirs,
    /// Identical mechanics to `Theirs`; conflict resolution already
    /// happened on the source branch.
    Manual,
}

/// Build and store a merge commit for `source_tip` into `target_tip`.
///
/// The commit's parents are `[target_tip, source_tip]` — order is for audit
/// display, not correctness. Neither branch ref is touched here; advancing
/// the target ref is the repository's job.
#[allow(clippy::too_many_arguments)]
pub async fn merge_commits<S>(
    store: &S,
    source_tip: &CommitId,
    target_tip: &CommitId,
    strategy: MergeStrategy,
    author: &str,
    timestamp: Timestamp,
    message: Option<String>,
) -> StoreResult<Commit>
where
    S: ObjectStore + ?Sized,
{
    let events = match strategy {
        MergeStrategy::Ours => Vec::new(),
        MergeStrategy::Theirs | MergeStrategy::Manual => {
            let target_ids: HashSet<_> = collect_event_ids(store, target_tip)
                .await?
                .into_iter()
                .collect();
            // Source-chronological order, minus anything target already has.
            collect_event_ids(store, source_tip)
                .await?
                .into_iter()
                .filter(|id| !target_ids.contains(id))
                .collect()
        }
    };

    debug!(
        source = %source_tip.short_hex(),
        target = %target_tip.short_hex(),
        ?strategy,
        carried = events.len(),
        "merge"
    );

    let commit = Commit::build(
        vec![*target_tip, *source_tip],
        events,
        author,
        timestamp,
        message,
    );
    store.put_commit(&commit).await?;
    Ok(commit)
}
