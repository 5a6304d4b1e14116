use tracing::debug;
use verdict_dag::{collect_event_ids, sort_newest_first, walk_ancestry};
use verdict_diff::{diff_commits, BranchDiff};
use verdict_merge::{merge_commits, MergeStrategy};
use verdict_projection::{project, DomainState};
use verdict_refs::{Ref, RefStore};
use verdict_store::ObjectStore;
use verdict_types::{Clock, Commit, Event};

use crate::error::{RepoError, RepoResult};

/// A commit/branch repository over pluggable object and ref stores.
///
/// Backends are injected at construction; the repository owns a [`Clock`]
/// for commit timestamps so stamps stay monotonic per process.
pub struct Repository<S, R> {
    store: S,
    refs: R,
    clock: Clock,
}

impl<S: ObjectStore, R: RefStore> Repository<S, R> {
    /// Create a repository over the given backends.
    pub fn new(store: S, refs: R) -> Self {
        Self {
            store,
            refs,
            clock: Clock::new(),
        }
    }

    /// The underlying object store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying ref store.
    pub fn refs(&self) -> &R {
        &self.refs
    }

    /// Persist `events` as a new commit on `branch` and advance its ref.
    ///
    /// Events are written to the object store first (idempotently), so a
    /// commit is never visible before the objects it references. The new
    /// commit's single parent is the branch's current tip, or none when the
    /// branch is new.
    pub async fn commit(
        &self,
        branch: &str,
        events: &[Event],
        author: &str,
        message: Option<String>,
    ) -> RepoResult<Commit> {
        for event in events {
            self.store.put_event(event).await?;
        }

        let parent = self.refs.get_ref(branch).await?.map(|r| r.target);
        let commit = Commit::build(
            parent.into_iter().collect(),
            events.iter().map(|e| e.id).collect(),
            author,
            self.clock.tick(),
            message,
        );
        self.store.put_commit(&commit).await?;
        self.refs.put_ref(&Ref::branch(branch, commit.id)).await?;

        debug!(
            branch,
            commit = %commit.id.short_hex(),
            events = events.len(),
            "commit"
        );
        Ok(commit)
    }

    /// The full replay-ordered event list for `branch`.
    ///
    /// Returns an empty sequence for a branch with no ref.
    pub async fn checkout(&self, branch: &str) -> RepoResult<Vec<Event>> {
        let Some(reference) = self.refs.get_ref(branch).await? else {
            return Ok(Vec::new());
        };
        let ids = collect_event_ids(&self.store, &reference.target).await?;
        Ok(self.store.get_events(&ids).await?)
    }

    /// Project `branch` into materialized state.
    pub async fn state(&self, branch: &str) -> RepoResult<DomainState> {
        let events = self.checkout(branch).await?;
        Ok(project(&events))
    }

    /// Commits reachable from `branch`, newest first, optionally capped.
    ///
    /// Shared ancestors reachable through multiple paths (merges) appear
    /// once. Returns an empty list for a branch with no ref.
    pub async fn log(&self, branch: &str, limit: Option<usize>) -> RepoResult<Vec<Commit>> {
        let Some(reference) = self.refs.get_ref(branch).await? else {
            return Ok(Vec::new());
        };
        let mut commits = walk_ancestry(&self.store, &[reference.target]).await?;
        sort_newest_first(&mut commits);
        if let Some(limit) = limit {
            commits.truncate(limit);
        }
        Ok(commits)
    }

    /// Create `new_branch` pointing at `source_branch`'s current tip.
    ///
    /// Only the ref pointer is copied — the forked branch observes the
    /// source's history up to the fork point by DAG ancestry, not by
    /// copying data.
    pub async fn fork(&self, new_branch: &str, source_branch: &str) -> RepoResult<Ref> {
        let source = self.resolve(source_branch).await?;
        let reference = Ref::branch(new_branch, source.target);
        self.refs.put_ref(&reference).await?;
        debug!(new_branch, source_branch, tip = %source.target.short_hex(), "fork");
        Ok(reference)
    }

    /// All branch refs, sorted by name.
    pub async fn branches(&self) -> RepoResult<Vec<Ref>> {
        Ok(self.refs.branches().await?)
    }

    /// Delete a branch ref. Deleting the last remaining branch is rejected
    /// by the ref store.
    pub async fn delete_branch(&self, name: &str) -> RepoResult<bool> {
        Ok(self.refs.delete_ref(name).await?)
    }

    /// Diff `source_branch` against `target_branch` relative to their
    /// lowest common ancestor.
    pub async fn diff(&self, source_branch: &str, target_branch: &str) -> RepoResult<BranchDiff> {
        let source = self.resolve(source_branch).await?;
        let target = self.resolve(target_branch).await?;
        Ok(diff_commits(&self.store, &source.target, &target.target).await?)
    }

    /// Merge `source_branch` into `target_branch` and advance the target
    /// ref to the new two-parent commit. The source ref is untouched.
    pub async fn merge(
        &self,
        source_branch: &str,
        target_branch: &str,
        strategy: MergeStrategy,
        author: &str,
        message: Option<String>,
    ) -> RepoResult<Commit> {
        let source = self.resolve(source_branch).await?;
        let target = self.resolve(target_branch).await?;

        let commit = merge_commits(
            &self.store,
            &source.target,
            &target.target,
            strategy,
            author,
            self.clock.tick(),
            message,
        )
        .await?;

        self.refs
            .put_ref(&Ref::branch(target_branch, commit.id))
            .await?;
        Ok(commit)
    }

    async fn resolve(&self, branch: &str) -> RepoResult<Ref> {
        self.refs
            .get_ref(branch)
            .await?
            .ok_or_else(|| RepoError::BranchNotFound {
                name: branch.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use verdict_refs::{MemoryRefStore, RefError};
    use verdict_store::MemoryObjectStore;
    use verdict_types::{EventKind, Timestamp};

    use super::*;

    fn repo() -> Repository<MemoryObjectStore, MemoryRefStore> {
        Repository::new(MemoryObjectStore::new(), MemoryRefStore::new())
    }

    fn criterion_added(id: &str, label: &str, ms: u64) -> Event {
        Event::new(
            "alice",
            Timestamp::new(ms, 0),
            EventKind::CriterionAdded {
                criterion_id: id.into(),
                label: label.into(),
            },
        )
    }

    fn tool_added(id: &str, label: &str, ms: u64) -> Event {
        Event::new(
            "alice",
            Timestamp::new(ms, 0),
            EventKind::ToolAdded {
                tool_id: id.into(),
                label: label.into(),
            },
        )
    }

    #[tokio::test]
    async fn first_commit_is_root_and_sets_ref() {
        let repo = repo();
        let commit = repo
            .commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();
        assert!(commit.is_root());

        let reference = repo.refs().get_ref("main").await.unwrap().unwrap();
        assert_eq!(reference.target, commit.id);
    }

    #[tokio::test]
    async fn second_commit_chains_to_first() {
        let repo = repo();
        let first = repo
            .commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();
        let second = repo
            .commit("main", &[tool_added("t1", "Hammer", 2)], "alice", None)
            .await
            .unwrap();
        assert_eq!(second.parents, vec![first.id]);
    }

    #[tokio::test]
    async fn empty_commit_is_allowed() {
        let repo = repo();
        let commit = repo
            .commit("main", &[], "alice", Some("checkpoint".into()))
            .await
            .unwrap();
        assert!(commit.events.is_empty());
    }

    #[tokio::test]
    async fn checkout_unknown_branch_is_empty() {
        let repo = repo();
        assert!(repo.checkout("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_replays_in_commit_order() {
        let repo = repo();
        let e1 = criterion_added("c1", "Cost", 1);
        let e2 = tool_added("t1", "Hammer", 2);
        repo.commit("main", &[e1.clone()], "alice", None).await.unwrap();
        repo.commit("main", &[e2.clone()], "alice", None).await.unwrap();

        let events = repo.checkout("main").await.unwrap();
        assert_eq!(events, vec![e1, e2]);
    }

    #[tokio::test]
    async fn state_projects_checkout() {
        let repo = repo();
        repo.commit(
            "main",
            &[criterion_added("c1", "Cost", 1), tool_added("t1", "Hammer", 2)],
            "alice",
            None,
        )
        .await
        .unwrap();

        let state = repo.state("main").await.unwrap();
        assert_eq!(state.criteria.len(), 1);
        assert_eq!(state.tools.len(), 1);
    }

    #[tokio::test]
    async fn log_is_newest_first_and_capped() {
        let repo = repo();
        for i in 0..5 {
            repo.commit(
                "main",
                &[],
                "alice",
                Some(format!("commit {i}")),
            )
            .await
            .unwrap();
        }

        let log = repo.log("main", None).await.unwrap();
        assert_eq!(log.len(), 5);
        assert_eq!(log[0].message.as_deref(), Some("commit 4"));
        for pair in log.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }

        let capped = repo.log("main", Some(2)).await.unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn log_unknown_branch_is_empty() {
        let repo = repo();
        assert!(repo.log("nope", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fork_copies_only_the_pointer() {
        let repo = repo();
        let tip = repo
            .commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();

        let forked = repo.fork("feature", "main").await.unwrap();
        assert_eq!(forked.target, tip.id);

        // Forked branch sees the shared history through ancestry.
        let events = repo.checkout("feature").await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn fork_of_missing_branch_fails() {
        let repo = repo();
        let err = repo.fork("feature", "ghost").await.unwrap_err();
        assert!(matches!(err, RepoError::BranchNotFound { .. }));
    }

    #[tokio::test]
    async fn branches_are_isolated_until_merged() {
        let repo = repo();
        repo.commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();
        repo.fork("feature", "main").await.unwrap();
        repo.commit(
            "feature",
            &[criterion_added("c2", "Speed", 2)],
            "alice",
            None,
        )
        .await
        .unwrap();

        // Events committed on feature never leak into main's projection.
        let main_state = repo.state("main").await.unwrap();
        assert_eq!(main_state.criteria.len(), 1);

        let feature_state = repo.state("feature").await.unwrap();
        assert_eq!(feature_state.criteria.len(), 2);
    }

    #[tokio::test]
    async fn diff_after_fork_reports_feature_only_event() {
        let repo = repo();
        repo.commit(
            "main",
            &[criterion_added("c1", "Cost", 1), tool_added("o1", "Opt", 2)],
            "alice",
            None,
        )
        .await
        .unwrap();
        let fork_point = repo.refs().get_ref("main").await.unwrap().unwrap().target;

        repo.fork("feature", "main").await.unwrap();
        let c2 = criterion_added("c2", "Speed", 3);
        repo.commit("feature", &[c2.clone()], "alice", None)
            .await
            .unwrap();

        let diff = repo.diff("feature", "main").await.unwrap();
        assert_eq!(diff.base, Some(fork_point));
        assert_eq!(diff.source_events.len(), 1);
        assert_eq!(diff.source_events[0].id, c2.id);
        assert!(diff.target_events.is_empty());
    }

    #[tokio::test]
    async fn diff_missing_branch_fails() {
        let repo = repo();
        repo.commit("main", &[], "alice", None).await.unwrap();
        let err = repo.diff("ghost", "main").await.unwrap_err();
        assert!(matches!(err, RepoError::BranchNotFound { .. }));
    }

    #[tokio::test]
    async fn merge_theirs_brings_source_events_into_target() {
        let repo = repo();
        repo.commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();
        repo.fork("feature", "main").await.unwrap();
        repo.commit(
            "feature",
            &[criterion_added("c2", "Speed", 2)],
            "alice",
            None,
        )
        .await
        .unwrap();

        let merge = repo
            .merge("feature", "main", MergeStrategy::Theirs, "alice", None)
            .await
            .unwrap();
        assert!(merge.is_merge());

        let state = repo.state("main").await.unwrap();
        assert_eq!(state.criteria.len(), 2);
    }

    #[tokio::test]
    async fn merge_ours_keeps_target_state() {
        let repo = repo();
        repo.commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();
        repo.fork("feature", "main").await.unwrap();
        repo.commit(
            "feature",
            &[criterion_added("c2", "Speed", 2)],
            "alice",
            None,
        )
        .await
        .unwrap();

        repo.merge("feature", "main", MergeStrategy::Ours, "alice", None)
            .await
            .unwrap();

        let state = repo.state("main").await.unwrap();
        assert_eq!(state.criteria.len(), 1);
        // The DAG still records both parents for audit.
        let log = repo.log("main", Some(1)).await.unwrap();
        assert!(log[0].is_merge());
    }

    #[tokio::test]
    async fn merge_leaves_source_ref_untouched() {
        let repo = repo();
        repo.commit("main", &[], "alice", None).await.unwrap();
        repo.fork("feature", "main").await.unwrap();
        let feature_tip = repo
            .commit("feature", &[criterion_added("c2", "Speed", 1)], "alice", None)
            .await
            .unwrap();

        repo.merge("feature", "main", MergeStrategy::Theirs, "alice", None)
            .await
            .unwrap();

        let reference = repo.refs().get_ref("feature").await.unwrap().unwrap();
        assert_eq!(reference.target, feature_tip.id);
    }

    #[tokio::test]
    async fn merge_missing_branch_fails() {
        let repo = repo();
        repo.commit("main", &[], "alice", None).await.unwrap();
        let err = repo
            .merge("ghost", "main", MergeStrategy::Theirs, "alice", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::BranchNotFound { .. }));
    }

    #[tokio::test]
    async fn deleting_only_branch_is_rejected() {
        let repo = repo();
        repo.commit("main", &[], "alice", None).await.unwrap();

        let err = repo.delete_branch("main").await.unwrap_err();
        assert!(matches!(err, RepoError::Ref(RefError::DeleteLastBranch { .. })));

        let branches = repo.branches().await.unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].name, "main");
    }

    #[tokio::test]
    async fn works_over_durable_kv_backends() {
        use verdict_kv::MemoryKv;
        use verdict_refs::KvRefStore;
        use verdict_store::KvObjectStore;

        let repo = Repository::new(
            KvObjectStore::new(MemoryKv::new(), "matrix"),
            KvRefStore::new(MemoryKv::new(), "matrix"),
        );
        repo.commit("main", &[criterion_added("c1", "Cost", 1)], "alice", None)
            .await
            .unwrap();
        let state = repo.state("main").await.unwrap();
        assert_eq!(state.criteria.len(), 1);
    }
}
