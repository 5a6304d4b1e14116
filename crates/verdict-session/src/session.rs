use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};
use verdict_projection::{apply, project, DomainState};
use verdict_refs::RefStore;
use verdict_repo::Repository;
use verdict_store::ObjectStore;
use verdict_types::{Clock, Commit, Event, EventKind};

use crate::error::SessionResult;

struct Inner {
    branch: String,
    state: DomainState,
    pending: Vec<Event>,
    /// Bumped on every flush and every (re)scheduled debounce. A sleeping
    /// debounce task only fires if the generation it captured is still
    /// current, so newer activity supersedes it.
    generation: u64,
}

/// A live editing session bound to one branch of a repository.
///
/// Owned by a single caller (no ambient singleton). Dispatched events are
/// projected into the in-memory state immediately and queued until a flush
/// turns them into one commit. Methods take `&self`; internal state lives
/// behind a mutex so debounced flush tasks can reach it.
pub struct Session<S, R> {
    repo: Arc<Repository<S, R>>,
    inner: Arc<Mutex<Inner>>,
    clock: Clock,
    author: String,
}

impl<S: ObjectStore, R: RefStore> Session<S, R> {
    /// Open a session on `branch`, replaying its history into live state.
    ///
    /// A branch with no ref yet opens onto empty state; the branch is
    /// created by the first flush.
    pub async fn open(
        repo: Repository<S, R>,
        branch: &str,
        author: &str,
    ) -> SessionResult<Self> {
        let events = repo.checkout(branch).await?;
        let state = project(&events);
        Ok(Self {
            repo: Arc::new(repo),
            inner: Arc::new(Mutex::new(Inner {
                branch: branch.to_string(),
                state,
                pending: Vec::new(),
                generation: 0,
            })),
            clock: Clock::new(),
            author: author.to_string(),
        })
    }

    /// The underlying repository.
    pub fn repo(&self) -> &Repository<S, R> {
        &self.repo
    }

    /// The branch this session is editing.
    pub fn branch(&self) -> String {
        self.inner.lock().expect("lock poisoned").branch.clone()
    }

    /// Mint an event for `kind`, apply it to live state, and queue it.
    ///
    /// Synchronous and optimistic: the projected state reflects the event
    /// before anything is durably committed.
    pub fn dispatch(&self, kind: EventKind) -> Event {
        let event = Event::new(self.author.as_str(), self.clock.tick(), kind);
        let mut inner = self.inner.lock().expect("lock poisoned");
        apply(&mut inner.state, &event);
        inner.pending.push(event.clone());
        debug!(kind = event.kind.tag(), pending = inner.pending.len(), "dispatch");
        event
    }

    /// Commit all pending events now. Returns `None` when nothing is
    /// pending; cancels any scheduled debounced flush either way.
    ///
    /// On a commit failure the events are re-queued ahead of anything
    /// dispatched meanwhile, so a later flush retries them in order.
    pub async fn flush(&self) -> SessionResult<Option<Commit>> {
        let (branch, events) = {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.generation += 1;
            if inner.pending.is_empty() {
                return Ok(None);
            }
            (inner.branch.clone(), std::mem::take(&mut inner.pending))
        };

        match self.repo.commit(&branch, &events, &self.author, None).await {
            Ok(commit) => Ok(Some(commit)),
            Err(err) => {
                let mut inner = self.inner.lock().expect("lock poisoned");
                let tail = std::mem::take(&mut inner.pending);
                inner.pending = events;
                inner.pending.extend(tail);
                Err(err.into())
            }
        }
    }

    /// Current projected state, pending events included.
    pub fn state(&self) -> DomainState {
        self.inner.lock().expect("lock poisoned").state.clone()
    }

    /// Number of dispatched events not yet flushed.
    pub fn pending_len(&self) -> usize {
        self.inner.lock().expect("lock poisoned").pending.len()
    }

    /// Flush pending events on the old branch, then replay and re-project
    /// the target branch. A branch with no ref switches onto empty state.
    pub async fn switch_branch(&self, branch: &str) -> SessionResult<()> {
        self.flush().await?;
        let events = self.repo.checkout(branch).await?;
        let state = project(&events);
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.branch = branch.to_string();
        inner.state = state;
        debug!(branch, events = events.len(), "switch branch");
        Ok(())
    }
}

impl<S, R> Session<S, R>
where
    S: ObjectStore + 'static,
    R: RefStore + 'static,
{
    /// Schedule a flush after `delay`, coalescing bursts of edits.
    ///
    /// Re-scheduling (or an explicit [`flush`](Session::flush)) before the
    /// delay elapses supersedes the earlier timer, so only the last schedule
    /// in a burst fires. A failed debounced commit re-queues its events and
    /// logs a warning rather than surfacing an error nobody is awaiting.
    pub fn flush_after(&self, delay: Duration) {
        let generation = {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.generation += 1;
            inner.generation
        };
        let repo = Arc::clone(&self.repo);
        let inner = Arc::clone(&self.inner);
        let author = self.author.clone();

        tokio::spawn(async move {
            sleep(delay).await;
            let (branch, events) = {
                let mut guard = inner.lock().expect("lock poisoned");
                if guard.generation != generation || guard.pending.is_empty() {
                    return;
                }
                guard.generation += 1;
                (guard.branch.clone(), std::mem::take(&mut guard.pending))
            };
            if let Err(err) = repo.commit(&branch, &events, &author, None).await {
                warn!(%err, branch, "debounced flush failed, events re-queued");
                let mut guard = inner.lock().expect("lock poisoned");
                let tail = std::mem::take(&mut guard.pending);
                guard.pending = events;
                guard.pending.extend(tail);
            }
        });
    }
}
