// Producer Use Cases - submit-and-forget and submit-and-wait

use crate::domain::Event;
use crate::error::{Error, Result};
use crate::port::EventStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Bounds for the synchronous wait protocol.
#[derive(Debug, Clone, Copy)]
pub struct SyncWaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for SyncWaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(200),
        }
    }
}

/// Creates queue items. Two modes: fire-and-forget and wait-for-result.
pub struct ProducerService {
    store: Arc<dyn EventStore>,
    wait: SyncWaitConfig,
}

impl ProducerService {
    pub fn new(store: Arc<dyn EventStore>, wait: SyncWaitConfig) -> Self {
        Self { store, wait }
    }

    /// Allocate an id, insert a pending event, return immediately.
    pub async fn submit_async(&self) -> Result<Event> {
        let event = self.store.insert_pending().await?;
        debug!(event_id = event.id, "Event submitted");
        Ok(event)
    }

    /// Allocate and insert, then poll until a worker commits a value or the
    /// deadline passes. This is a client-side spin-wait substitute for a
    /// push notification channel; it blocks only the calling request.
    ///
    /// On timeout the event stays pending and will still be processed by
    /// some worker eventually.
    pub async fn submit_sync(&self) -> Result<Event> {
        let event = self.submit_async().await?;
        let deadline = Instant::now() + self.wait.timeout;

        loop {
            if let Some(found) = self.store.find_by_id(event.id).await? {
                if found.is_completed() {
                    return Ok(found);
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(format!(
                    "event {} not processed within {:?}",
                    event.id, self.wait.timeout
                )));
            }
            sleep(self.wait.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::event_store::mocks::InMemoryEventStore;

    fn fast_wait() -> SyncWaitConfig {
        SyncWaitConfig {
            timeout: Duration::from_millis(250),
            poll_interval: Duration::from_millis(20),
        }
    }

    #[tokio::test]
    async fn submit_async_allocates_contiguous_ids() {
        let store = Arc::new(InMemoryEventStore::new());
        let producer = ProducerService::new(store.clone(), fast_wait());

        for expected in 1..=3 {
            let event = producer.submit_async().await.unwrap();
            assert_eq!(event.id, expected);
            assert!(event.is_pending());
        }
        assert_eq!(store.allocated_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn submit_sync_returns_once_completed() {
        let store = Arc::new(InMemoryEventStore::new());
        let producer = ProducerService::new(store.clone(), fast_wait());

        let completer = store.clone();
        let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(60)).await;
            completer.force_complete(1, "pronto");
        });

        let event = producer.submit_sync().await.unwrap();
        assert_eq!(event.id, 1);
        assert_eq!(event.value.as_deref(), Some("pronto"));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn submit_sync_times_out_and_leaves_event_pending() {
        let store = Arc::new(InMemoryEventStore::new());
        let producer = ProducerService::new(store.clone(), fast_wait());

        let started = Instant::now();
        let err = producer.submit_sync().await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, Error::Timeout(_)));
        // Deadline honored within one poll interval.
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < Duration::from_millis(400));

        let event = store.find_by_id(1).await.unwrap().unwrap();
        assert!(event.is_pending());
    }
}
