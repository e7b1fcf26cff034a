//! Sequent - Main Entry Point
//! HTTP API + worker pool over the shared SQLite store.

mod settings;
mod words;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sequent_api_http::{build_router, AppState};
use sequent_core::application::recovery::release_stale_claims;
use sequent_core::application::{
    shutdown_channel, LookupService, ProducerService, SyncWaitConfig, Worker, WorkerConfig,
};
use sequent_core::port::{EventStore, SystemTimeProvider, TimeProvider, WordPool};
use sequent_infra_sqlite::{create_pool, run_migrations, SqliteEventStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long to wait for workers to finish their current event on shutdown.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging: pretty for development, JSON for production
    let log_format = std::env::var("SEQUENT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("sequent=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Sequent v{} starting...", VERSION);

    // 2. Configuration: fatal before serving if invalid
    let settings = settings::from_env();
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    info!(
        db = %settings.database_url,
        workers = settings.worker_count,
        pool_size = settings.content_pool.len(),
        "Configuration loaded"
    );

    // 3. Database
    let db_parent = std::path::Path::new(&settings.database_url).parent();
    if let Some(dir) = db_parent.filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("Failed to create data directory: {}", e))?;
    }
    let pool = create_pool(&settings.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Dependency wiring
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let store: Arc<dyn EventStore> =
        Arc::new(SqliteEventStore::new(pool.clone(), time_provider.clone()));
    let results = Arc::new(WordPool::new(settings.content_pool.clone()));

    // 5. Recover claims orphaned by a previous crash
    release_stale_claims(store.as_ref(), time_provider.as_ref(), settings.claim_ttl)
        .await
        .map_err(|e| anyhow::anyhow!("Claim recovery failed: {}", e))?;

    // 6. Worker pool
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let worker_config = WorkerConfig {
        idle_backoff: settings.idle_backoff,
        error_backoff: settings.error_backoff,
        work_delay: settings.work_delay,
    };

    let mut worker_handles = Vec::with_capacity(settings.worker_count);
    for n in 0..settings.worker_count {
        let worker = Worker::new(store.clone(), results.clone(), worker_config);
        let token = shutdown_rx.clone();
        worker_handles.push(tokio::spawn(async move {
            if let Err(e) = worker.run(token).await {
                error!(worker = n, error = %e, "Worker failed");
            }
        }));
    }
    info!(count = settings.worker_count, "Workers started");

    // 7. HTTP server
    let state = AppState::new(
        Arc::new(ProducerService::new(
            store.clone(),
            SyncWaitConfig {
                timeout: settings.sync_timeout,
                poll_interval: settings.sync_poll_interval,
            },
        )),
        Arc::new(LookupService::new(store.clone())),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.http_addr).await?;
    info!(addr = %settings.http_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 8. Graceful shutdown: stop claiming, let in-flight commits finish
    info!("Shutdown signal received. Draining workers...");
    shutdown_tx.shutdown();
    for handle in worker_handles {
        let _ = tokio::time::timeout(WORKER_DRAIN_TIMEOUT, handle).await;
    }

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
