// Lookup Use Cases - read-only surface over the store

use crate::domain::{Event, EventId};
use crate::error::Result;
use crate::port::EventStore;
use std::sync::Arc;

/// Read-only count and point lookup.
pub struct LookupService {
    store: Arc<dyn EventStore>,
}

impl LookupService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Total events ever allocated. Deliberately not a completion count:
    /// the counter measures allocation, so completing items does not move
    /// this number.
    pub async fn count(&self) -> Result<i64> {
        self.store.allocated_count().await
    }

    pub async fn get_by_id(&self, id: EventId) -> Result<Option<Event>> {
        self.store.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::event_store::mocks::InMemoryEventStore;

    #[tokio::test]
    async fn count_reflects_allocation_not_completion() {
        let store = Arc::new(InMemoryEventStore::new());
        for _ in 0..5 {
            store.insert_pending().await.unwrap();
        }
        store.force_complete(2, "dois");
        store.force_complete(4, "quatro");

        let lookup = LookupService::new(store);
        assert_eq!(lookup.count().await.unwrap(), 5);

        let completed = lookup.get_by_id(2).await.unwrap().unwrap();
        assert!(completed.value.is_some());
        let pending = lookup.get_by_id(3).await.unwrap().unwrap();
        assert!(pending.value.is_none());
    }

    #[tokio::test]
    async fn get_by_id_is_idempotent() {
        let store = Arc::new(InMemoryEventStore::new());
        store.insert_pending().await.unwrap();
        store.force_complete(1, "um");

        let lookup = LookupService::new(store);
        let first = lookup.get_by_id(1).await.unwrap();
        let second = lookup.get_by_id(1).await.unwrap();
        assert_eq!(first, second);
        assert!(lookup.get_by_id(99).await.unwrap().is_none());
    }
}
