// Runtime Settings
// The daemon populates this from environment variables; defaults match the
// constants the application services use on their own.

use crate::error::{Error, Result};
use std::time::Duration;

/// Everything the process needs to run. Built once at startup, held for the
/// process lifetime, passed down explicitly (no global state).
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite database path or URL.
    pub database_url: String,
    /// HTTP listen address, e.g. "0.0.0.0:8080".
    pub http_addr: String,
    /// Number of concurrent workers to spawn.
    pub worker_count: usize,
    /// Content pool the workers draw processed values from. Must be
    /// non-empty; validated at startup.
    pub content_pool: Vec<String>,
    /// submitSync wall-clock deadline.
    pub sync_timeout: Duration,
    /// submitSync polling cadence.
    pub sync_poll_interval: Duration,
    /// Worker sleep when no event is claimable.
    pub idle_backoff: Duration,
    /// Worker sleep after a processing failure.
    pub error_backoff: Duration,
    /// Simulated per-event work latency.
    pub work_delay: Duration,
    /// Claims older than this are released at startup (crash recovery).
    pub claim_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "~/.sequent/queue.db".to_string(),
            http_addr: "0.0.0.0:8080".to_string(),
            worker_count: 4,
            content_pool: Vec::new(),
            sync_timeout: Duration::from_secs(30),
            sync_poll_interval: Duration::from_millis(200),
            idle_backoff: Duration::from_millis(100),
            error_backoff: Duration::from_secs(1),
            work_delay: Duration::from_millis(100),
            claim_ttl: Duration::from_secs(300),
        }
    }
}

impl Settings {
    /// Startup validation. A failure here is fatal: the process must not
    /// begin serving with a broken configuration.
    pub fn validate(&self) -> Result<()> {
        if self.content_pool.is_empty() {
            return Err(Error::Config("content pool is empty".to_string()));
        }
        if self.worker_count == 0 {
            return Err(Error::Config("worker count must be at least 1".to_string()));
        }
        if self.sync_poll_interval.is_zero() {
            return Err(Error::Config(
                "sync poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Settings {
        Settings {
            content_pool: vec!["casa".into()],
            ..Settings::default()
        }
    }

    #[test]
    fn default_pool_is_rejected() {
        assert!(Settings::default().validate().is_err());
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn zero_workers_rejected() {
        let mut settings = valid();
        settings.worker_count = 0;
        assert!(matches!(settings.validate(), Err(Error::Config(_))));
    }
}
