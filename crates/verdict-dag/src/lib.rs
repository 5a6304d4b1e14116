//! Commit DAG traversal for Verdict.
//!
//! Commits live in the object store as an id-keyed arena; traversal is
//! explicit BFS over parent ids with a seen-set, never pointer-chasing.
//! The seen-set matters: merge commits have two parents, and naive
//! recursion would revisit shared ancestors exponentially.
//!
//! Two different orderings come out of the DAG:
//!
//! - **Recency order** for `log`: the full ancestry (all parents), sorted
//!   by timestamp descending *after* the walk. Traversal order is not
//!   chronological — parent pointer order is insertion order, not time
//!   order.
//! - **Replay order** for projection: the first-parent mainline, oldest
//!   first, each commit's event-id list appended to a running deduplicated
//!   sequence. A merge contributes the events it chose to carry (its event
//!   list), not everything reachable through its second parent — that is
//!   what makes an "ours" merge keep the target as-is while still
//!   recording both parents for audit.

use std::collections::{HashSet, VecDeque};

use tracing::debug;
use verdict_store::{ObjectStore, StoreError, StoreResult};
use verdict_types::{Commit, CommitId, EventId};

/// Walk the full ancestry DAG from one or more starting commits.
///
/// Follows *all* parents and returns every reachable commit exactly once,
/// in BFS traversal order (starting commits first). Fails with
/// [`StoreError::MissingCommit`] if a parent pointer dangles.
pub async fn walk_ancestry<S>(store: &S, tips: &[CommitId]) -> StoreResult<Vec<Commit>>
where
    S: ObjectStore + ?Sized,
{
    let mut seen: HashSet<CommitId> = HashSet::new();
    let mut queue: VecDeque<CommitId> = VecDeque::new();
    let mut commits = Vec::new();

    for tip in tips {
        if seen.insert(*tip) {
            queue.push_back(*tip);
        }
    }

    while let Some(id) = queue.pop_front() {
        let commit = store
            .get_commit(&id)
            .await?
            .ok_or(StoreError::MissingCommit(id))?;
        for parent in &commit.parents {
            if seen.insert(*parent) {
                queue.push_back(*parent);
            }
        }
        commits.push(commit);
    }

    debug!(tips = tips.len(), reachable = commits.len(), "ancestry walk");
    Ok(commits)
}

/// Collect the full ancestor id set reachable from `tip` (inclusive).
pub async fn ancestor_ids<S>(store: &S, tip: &CommitId) -> StoreResult<HashSet<CommitId>>
where
    S: ObjectStore + ?Sized,
{
    let commits = walk_ancestry(store, &[*tip]).await?;
    Ok(commits.into_iter().map(|c| c.id).collect())
}

/// Sort commits newest-first by timestamp for log display.
///
/// Ties (same timestamp) break on commit id so the order is total and
/// reproducible.
pub fn sort_newest_first(commits: &mut [Commit]) {
    commits.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// The first-parent mainline from `tip` back to the root, oldest first.
pub async fn mainline<S>(store: &S, tip: &CommitId) -> StoreResult<Vec<Commit>>
where
    S: ObjectStore + ?Sized,
{
    let mut commits = Vec::new();
    let mut cursor = Some(*tip);

    while let Some(id) = cursor {
        let commit = store
            .get_commit(&id)
            .await?
            .ok_or(StoreError::MissingCommit(id))?;
        cursor = commit.parents.first().copied();
        commits.push(commit);
    }

    commits.reverse();
    Ok(commits)
}

/// Deduplicated, causally-ordered event ids reachable from `tip`.
///
/// Walks the first-parent mainline oldest-first and appends each commit's
/// event-id list, skipping ids already seen. This defines event replay
/// order across the whole DAG, including after a merge: a merge commit
/// replays as the events it carries, appended after everything the target
/// mainline already had.
pub async fn collect_event_ids<S>(store: &S, tip: &CommitId) -> StoreResult<Vec<EventId>>
where
    S: ObjectStore + ?Sized,
{
    let commits = mainline(store, tip).await?;

    let mut seen: HashSet<EventId> = HashSet::new();
    let mut ids = Vec::new();
    for commit in &commits {
        for event_id in &commit.events {
            if seen.insert(*event_id) {
                ids.push(*event_id);
            }
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use verdict_store::MemoryObjectStore;
    use verdict_types::Timestamp;

    use super::*;

    /// Store a commit with the given parents and event ids.
    async fn commit_with(
        store: &MemoryObjectStore,
        parents: Vec<CommitId>,
        events: Vec<EventId>,
        ms: u64,
    ) -> Commit {
        let commit = Commit::build(parents, events, "alice", Timestamp::new(ms, 0), None);
        store.put_commit(&commit).await.unwrap();
        commit
    }

    #[tokio::test]
    async fn walk_linear_chain() {
        let store = MemoryObjectStore::new();
        let a = commit_with(&store, vec![], vec![], 1).await;
        let b = commit_with(&store, vec![a.id], vec![], 2).await;
        let c = commit_with(&store, vec![b.id], vec![], 3).await;

        let commits = walk_ancestry(&store, &[c.id]).await.unwrap();
        let ids: Vec<CommitId> = commits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn walk_visits_shared_ancestor_once() {
        let store = MemoryObjectStore::new();
        let root = commit_with(&store, vec![], vec![], 1).await;
        let left = commit_with(&store, vec![root.id], vec![], 2).await;
        let right = commit_with(&store, vec![root.id], vec![], 3).await;
        let merge = commit_with(&store, vec![left.id, right.id], vec![], 4).await;

        let commits = walk_ancestry(&store, &[merge.id]).await.unwrap();
        assert_eq!(commits.len(), 4);
        let root_visits = commits.iter().filter(|c| c.id == root.id).count();
        assert_eq!(root_visits, 1);
    }

    #[tokio::test]
    async fn walk_reaches_both_merge_parents() {
        let store = MemoryObjectStore::new();
        let left = commit_with(&store, vec![], vec![], 1).await;
        let right = commit_with(&store, vec![], vec![], 2).await;
        let merge = commit_with(&store, vec![left.id, right.id], vec![], 3).await;

        let commits = walk_ancestry(&store, &[merge.id]).await.unwrap();
        let ids: HashSet<CommitId> = commits.iter().map(|c| c.id).collect();
        assert!(ids.contains(&left.id));
        assert!(ids.contains(&right.id));
    }

    #[tokio::test]
    async fn walk_dangling_parent_errors() {
        let store = MemoryObjectStore::new();
        let ghost = CommitId::from_bytes(b"never stored");
        let err = walk_ancestry(&store, &[ghost]).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingCommit(_)));
    }

    #[tokio::test]
    async fn empty_tips_walk_nothing() {
        let store = MemoryObjectStore::new();
        let commits = walk_ancestry(&store, &[]).await.unwrap();
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn sort_is_by_timestamp_descending() {
        let store = MemoryObjectStore::new();
        // Parent pointers deliberately disagree with timestamps.
        let a = commit_with(&store, vec![], vec![], 5).await;
        let b = commit_with(&store, vec![a.id], vec![], 2).await;
        let c = commit_with(&store, vec![b.id], vec![], 9).await;

        let mut commits = walk_ancestry(&store, &[c.id]).await.unwrap();
        sort_newest_first(&mut commits);
        let stamps: Vec<u64> = commits.iter().map(|c| c.timestamp.wall_ms).collect();
        assert_eq!(stamps, vec![9, 5, 2]);
    }

    #[tokio::test]
    async fn mainline_follows_first_parent_only() {
        let store = MemoryObjectStore::new();
        let root = commit_with(&store, vec![], vec![], 1).await;
        let target = commit_with(&store, vec![root.id], vec![], 2).await;
        let source = commit_with(&store, vec![root.id], vec![], 3).await;
        let merge = commit_with(&store, vec![target.id, source.id], vec![], 4).await;

        let line = mainline(&store, &merge.id).await.unwrap();
        let ids: Vec<CommitId> = line.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![root.id, target.id, merge.id]);
    }

    #[tokio::test]
    async fn event_ids_are_oldest_first() {
        let store = MemoryObjectStore::new();
        let e1 = EventId::new();
        let e2 = EventId::new();
        let e3 = EventId::new();
        let a = commit_with(&store, vec![], vec![e1], 1).await;
        let b = commit_with(&store, vec![a.id], vec![e2, e3], 2).await;

        let ids = collect_event_ids(&store, &b.id).await.unwrap();
        assert_eq!(ids, vec![e1, e2, e3]);
    }

    #[tokio::test]
    async fn merge_replays_as_target_line_plus_carried_events() {
        let store = MemoryObjectStore::new();
        let shared = EventId::new();
        let target_only = EventId::new();
        let source_only = EventId::new();

        let root = commit_with(&store, vec![], vec![shared], 1).await;
        let target = commit_with(&store, vec![root.id], vec![target_only], 2).await;
        let source = commit_with(&store, vec![root.id], vec![source_only], 3).await;
        // A "theirs" merge carries the source-only event ids itself.
        let merge = commit_with(&store, vec![target.id, source.id], vec![source_only], 4).await;

        let ids = collect_event_ids(&store, &merge.id).await.unwrap();
        assert_eq!(ids, vec![shared, target_only, source_only]);
    }

    #[tokio::test]
    async fn carried_duplicates_are_skipped() {
        let store = MemoryObjectStore::new();
        let e = EventId::new();
        let a = commit_with(&store, vec![], vec![e], 1).await;
        // A commit that (incorrectly) repeats an already-introduced id.
        let b = commit_with(&store, vec![a.id], vec![e], 2).await;

        let ids = collect_event_ids(&store, &b.id).await.unwrap();
        assert_eq!(ids, vec![e]);
    }
}
