// Event Store Port (Interface)

use crate::domain::{Event, EventId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for the durable event queue.
///
/// The store is the only shared mutable resource in the system: producers
/// and workers coordinate exclusively through it and never cache ids or
/// values outside the current request.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Allocate the next id from the shared counter and insert a pending
    /// event, atomically. Two concurrent callers never receive the same id
    /// and allocated ids have no gaps.
    async fn insert_pending(&self) -> Result<Event>;

    /// Point lookup, no locking. `None` if the id was never allocated.
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>>;

    /// Claim one pending, unclaimed event for exclusive processing.
    ///
    /// Contract: never blocks on contention. If every pending row is
    /// currently claimed by another worker this returns `None`, even though
    /// pending items exist. At most one worker holds the claim on a given
    /// row at any time. Any substitute backing store must preserve this
    /// non-blocking behavior, not merely "a" locking mechanism.
    async fn claim_one(&self) -> Result<Option<EventId>>;

    /// Set the result of a claimed event and release the claim. Fails if
    /// the event already has a value; a committed value is never replaced.
    async fn commit_result(&self, id: EventId, value: &str) -> Result<()>;

    /// Release the claim on a still-pending event so it becomes claimable
    /// again. Worker failure path.
    async fn release(&self, id: EventId) -> Result<()>;

    /// Release claims stamped before `cutoff_ms`. Crash recovery for
    /// workers that died between claim and commit. Returns how many claims
    /// were released.
    async fn release_claims_older_than(&self, cutoff_ms: i64) -> Result<u64>;

    /// Current counter value: total events ever allocated, not completed.
    async fn allocated_count(&self) -> Result<i64>;
}

/// In-memory store for unit tests (core cannot depend on infrastructure).
pub mod mocks {
    use super::*;
    use crate::error::Error;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Inner {
        counter: i64,
        // id -> completed value
        events: BTreeMap<EventId, Option<String>>,
        // id -> claim stamp (ms)
        claims: HashMap<EventId, i64>,
    }

    /// Mutex-backed [`EventStore`] with optional commit-failure injection.
    #[derive(Default)]
    pub struct InMemoryEventStore {
        inner: Mutex<Inner>,
        fail_commits: bool,
    }

    impl InMemoryEventStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store whose `commit_result` always fails, for exercising the
        /// worker's release-and-backoff path.
        pub fn failing_commits() -> Self {
            Self {
                inner: Mutex::new(Inner::default()),
                fail_commits: true,
            }
        }

        /// Complete an event directly, bypassing the claim protocol.
        /// Simulates "some worker elsewhere finished it".
        pub fn force_complete(&self, id: EventId, value: &str) {
            let mut inner = self.inner.lock().unwrap();
            inner.events.insert(id, Some(value.to_string()));
            inner.claims.remove(&id);
        }
    }

    #[async_trait]
    impl EventStore for InMemoryEventStore {
        async fn insert_pending(&self) -> Result<Event> {
            let mut inner = self.inner.lock().unwrap();
            inner.counter += 1;
            let id = inner.counter;
            if inner.events.insert(id, None).is_some() {
                return Err(Error::Internal(format!("duplicate event id {id}")));
            }
            Ok(Event::pending(id))
        }

        async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .events
                .get(&id)
                .map(|value| Event { id, value: value.clone() }))
        }

        async fn claim_one(&self) -> Result<Option<EventId>> {
            let mut guard = self.inner.lock().unwrap();
            let inner = &mut *guard;
            let candidate = inner
                .events
                .iter()
                .find(|(id, value)| value.is_none() && !inner.claims.contains_key(*id))
                .map(|(id, _)| *id);
            if let Some(id) = candidate {
                inner.claims.insert(id, 0);
            }
            Ok(candidate)
        }

        async fn commit_result(&self, id: EventId, value: &str) -> Result<()> {
            if self.fail_commits {
                return Err(Error::Store("injected commit failure".into()));
            }
            let mut inner = self.inner.lock().unwrap();
            let current = inner.events.get(&id).cloned();
            match current {
                Some(None) => {
                    inner.events.insert(id, Some(value.to_string()));
                    inner.claims.remove(&id);
                    Ok(())
                }
                Some(Some(_)) => Err(Error::Internal(format!(
                    "event {id} already has a value"
                ))),
                None => Err(Error::NotFound(format!("event {id}"))),
            }
        }

        async fn release(&self, id: EventId) -> Result<()> {
            let mut inner = self.inner.lock().unwrap();
            inner.claims.remove(&id);
            Ok(())
        }

        async fn release_claims_older_than(&self, cutoff_ms: i64) -> Result<u64> {
            let mut inner = self.inner.lock().unwrap();
            let stale: Vec<EventId> = inner
                .claims
                .iter()
                .filter(|(_, stamp)| **stamp < cutoff_ms)
                .map(|(id, _)| *id)
                .collect();
            for id in &stale {
                inner.claims.remove(id);
            }
            Ok(stale.len() as u64)
        }

        async fn allocated_count(&self) -> Result<i64> {
            Ok(self.inner.lock().unwrap().counter)
        }
    }
}
