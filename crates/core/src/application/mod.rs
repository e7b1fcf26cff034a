// Application Layer - Use cases wired against the ports

pub mod lookup;
pub mod producer;
pub mod recovery;
pub mod worker;

pub use lookup::LookupService;
pub use producer::{ProducerService, SyncWaitConfig};
pub use recovery::release_stale_claims;
pub use worker::{shutdown_channel, ShutdownSender, ShutdownToken, Worker, WorkerConfig};
