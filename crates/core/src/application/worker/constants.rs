// Worker defaults (no magic values inline)
use std::time::Duration;

/// Sleep when no event is claimable (100ms)
pub const IDLE_BACKOFF: Duration = Duration::from_millis(100);

/// Sleep after a processing failure before the next claim attempt (1s)
pub const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Simulated per-event work latency (100ms)
pub const WORK_DELAY: Duration = Duration::from_millis(100);
