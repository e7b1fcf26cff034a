// Environment-driven settings load.

use crate::words::DEFAULT_WORDS;
use sequent_core::config::Settings;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "~/.sequent/queue.db";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

fn env_duration_ms(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

/// Build [`Settings`] from `SEQUENT_*` environment variables, falling back
/// to the defaults. Validation happens at the call site so a broken value
/// is fatal before anything starts serving.
pub fn from_env() -> Settings {
    let defaults = Settings::default();

    let database_url = std::env::var("SEQUENT_DB_PATH")
        .map(|p| shellexpand::tilde(&p).into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let http_addr =
        std::env::var("SEQUENT_HTTP_ADDR").unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string());

    let worker_count = std::env::var("SEQUENT_WORKERS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);

    let content_pool = match std::env::var("SEQUENT_CONTENT_POOL") {
        Ok(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
    };

    Settings {
        database_url,
        http_addr,
        worker_count,
        content_pool,
        sync_timeout: env_duration_ms("SEQUENT_SYNC_TIMEOUT_MS", defaults.sync_timeout),
        sync_poll_interval: env_duration_ms("SEQUENT_SYNC_POLL_MS", defaults.sync_poll_interval),
        idle_backoff: env_duration_ms("SEQUENT_IDLE_BACKOFF_MS", defaults.idle_backoff),
        error_backoff: env_duration_ms("SEQUENT_ERROR_BACKOFF_MS", defaults.error_backoff),
        work_delay: env_duration_ms("SEQUENT_WORK_DELAY_MS", defaults.work_delay),
        claim_ttl: env_duration_ms("SEQUENT_CLAIM_TTL_MS", defaults.claim_ttl),
    }
}
