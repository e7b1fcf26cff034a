// Worker - claim/process/commit loop

pub mod constants;
mod shutdown;

use constants::*;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::error::Result;
use crate::port::{EventStore, ResultSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

/// Knobs for the worker loop. Defaults mirror [`constants`].
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    pub idle_backoff: Duration,
    pub error_backoff: Duration,
    pub work_delay: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            idle_backoff: IDLE_BACKOFF,
            error_backoff: ERROR_BACKOFF,
            work_delay: WORK_DELAY,
        }
    }
}

/// One worker in the pool. Workers share nothing in process; they coordinate
/// only through the store's claim protocol, so any number of them can run
/// against the same database.
pub struct Worker {
    store: Arc<dyn EventStore>,
    results: Arc<dyn ResultSource>,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(
        store: Arc<dyn EventStore>,
        results: Arc<dyn ResultSource>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            store,
            results,
            config,
        }
    }

    /// Run the loop until shutdown. A failed event never terminates the
    /// loop; it backs off and tries again. Cancellation is cooperative and
    /// lands between claim attempts, never mid-commit.
    pub async fn run(&self, mut shutdown: ShutdownToken) -> Result<()> {
        info!("Worker started");
        loop {
            if shutdown.is_shutdown() {
                break;
            }
            match self.process_next_event().await {
                Ok(true) => {
                    // Processed one; look for the next immediately.
                }
                Ok(false) => {
                    tokio::select! {
                        _ = sleep(self.config.idle_backoff) => {},
                        _ = shutdown.wait() => break,
                    }
                }
                Err(e) => {
                    error!(error = %e, "Worker error");
                    tokio::select! {
                        _ = sleep(self.config.error_backoff) => {},
                        _ = shutdown.wait() => break,
                    }
                }
            }
        }
        info!("Worker stopped");
        Ok(())
    }

    /// One Claim -> Process -> Commit step. Returns `false` when nothing
    /// was claimable (all pending rows taken by other workers, or queue
    /// empty). On a commit failure the claim is released so the event
    /// becomes claimable again, and the error is surfaced to the loop.
    pub async fn process_next_event(&self) -> Result<bool> {
        let Some(id) = self.store.claim_one().await? else {
            return Ok(false);
        };

        let value = self.results.next_value();
        if !self.config.work_delay.is_zero() {
            sleep(self.config.work_delay).await;
        }

        match self.store.commit_result(id, &value).await {
            Ok(()) => {
                info!(event_id = id, "Processed event");
                Ok(true)
            }
            Err(e) => {
                if let Err(release_err) = self.store.release(id).await {
                    error!(event_id = id, error = %release_err, "Failed to release claim");
                }
                Err(e)
            }
        }
    }
}
