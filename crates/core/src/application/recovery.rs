// Claim Recovery - release claims orphaned by a crashed worker

use crate::error::Result;
use crate::port::{EventStore, TimeProvider};
use std::time::Duration;
use tracing::{info, warn};

/// Release claims stamped more than `claim_ttl` ago.
///
/// A worker that dies between claim and commit leaves its row stamped but
/// never committed; without this the row would stay unclaimable forever.
/// Run at daemon startup, before workers start.
pub async fn release_stale_claims(
    store: &dyn EventStore,
    time: &dyn TimeProvider,
    claim_ttl: Duration,
) -> Result<u64> {
    let cutoff = time.now_millis() - claim_ttl.as_millis() as i64;
    let released = store.release_claims_older_than(cutoff).await?;
    if released > 0 {
        warn!(released, "Released stale claims from a previous run");
    } else {
        info!("No stale claims found");
    }
    Ok(released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::event_store::mocks::InMemoryEventStore;
    use crate::port::time_provider::mocks::FixedTimeProvider;

    #[tokio::test]
    async fn releases_only_stale_claims() {
        let store = InMemoryEventStore::new();
        store.insert_pending().await.unwrap();
        let claimed = store.claim_one().await.unwrap();
        assert_eq!(claimed, Some(1));
        // The mock stamps claims at 0 ms.

        let time = FixedTimeProvider::new(10_000);
        let released = release_stale_claims(&store, &time, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(released, 1);

        // Claim is gone, the event is claimable again.
        assert_eq!(store.claim_one().await.unwrap(), Some(1));

        // A fresh claim survives a recovery pass with a generous ttl.
        let released = release_stale_claims(&store, &time, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(released, 0);
    }
}
