//! Branch diffing for Verdict.
//!
//! A diff between two commit tips answers two questions: where did the
//! branches fork ([`find_lca`]), and what has each side done since
//! ([`diff_commits`]). The unique-event computation is LCA-relative:
//! everything reachable from a tip minus everything reachable from the
//! common ancestor. Disjoint histories (no common ancestor at all) are an
//! edge case, not the common path — both sides are then "everything".

use std::collections::{HashSet, VecDeque};

use tracing::debug;
use verdict_dag::{ancestor_ids, collect_event_ids};
use verdict_projection::{project, DomainState};
use verdict_store::{ObjectStore, StoreError, StoreResult};
use verdict_types::{CommitId, Event};

/// The result of diffing a source branch tip against a target branch tip.
#[derive(Clone, Debug)]
pub struct BranchDiff {
    /// The lowest common ancestor, if the histories share one.
    pub base: Option<CommitId>,
    /// Events reachable from the source tip but not from the base.
    pub source_events: Vec<Event>,
    /// Events reachable from the target tip but not from the base.
    pub target_events: Vec<Event>,
    /// The source side's fully projected state.
    pub source_state: DomainState,
    /// The target side's fully projected state.
    pub target_state: DomainState,
}

impl BranchDiff {
    /// Returns `true` if neither side has unique events.
    pub fn is_empty(&self) -> bool {
        self.source_events.is_empty() && self.target_events.is_empty()
    }
}

/// Find the lowest common ancestor of two commits.
///
/// Collects the full ancestor set of `a`, then walks `b`'s ancestry
/// breadth-first and returns the first commit already present in `a`'s set.
/// Returns `None` only for fully disjoint histories.
pub async fn find_lca<S>(
    store: &S,
    a: &CommitId,
    b: &CommitId,
) -> StoreResult<Option<CommitId>>
where
    S: ObjectStore + ?Sized,
{
    let a_ancestors = ancestor_ids(store, a).await?;

    let mut seen: HashSet<CommitId> = HashSet::new();
    let mut queue: VecDeque<CommitId> = VecDeque::new();
    seen.insert(*b);
    queue.push_back(*b);

    while let Some(id) = queue.pop_front() {
        if a_ancestors.contains(&id) {
            return Ok(Some(id));
        }
        let commit = store
            .get_commit(&id)
            .await?
            .ok_or(StoreError::MissingCommit(id))?;
        for parent in &commit.parents {
            if seen.insert(*parent) {
                queue.push_back(*parent);
            }
        }
    }

    Ok(None)
}

/// Diff two commit tips: unique events per side plus full projected states.
pub async fn diff_commits<S>(
    store: &S,
    source_tip: &CommitId,
    target_tip: &CommitId,
) -> StoreResult<BranchDiff>
where
    S: ObjectStore + ?Sized,
{
    let base = find_lca(store, source_tip, target_tip).await?;

    let base_ids: HashSet<_> = match &base {
        Some(lca) => collect_event_ids(store, lca).await?.into_iter().collect(),
        None => HashSet::new(),
    };

    let source_all = collect_event_ids(store, source_tip).await?;
    let target_all = collect_event_ids(store, target_tip).await?;

    let source_unique: Vec<_> = source_all
        .iter()
        .filter(|id| !base_ids.contains(id))
        .copied()
        .collect();
    let target_unique: Vec<_> = target_all
        .iter()
        .filter(|id| !base_ids.contains(id))
        .copied()
        .collect();

    debug!(
        base = base.as_ref().map(|id| id.short_hex()),
        source_unique = source_unique.len(),
        target_unique = target_unique.len(),
        "branch diff"
    );

    let source_events = store.get_events(&source_unique).await?;
    let target_events = store.get_events(&target_unique).await?;
    let source_state = project(&store.get_events(&source_all).await?);
    let target_state = project(&store.get_events(&target_all).await?);

    Ok(BranchDiff {
        base,
        source_events,
        target_events,
        source_state,
        target_state,
    })
}
