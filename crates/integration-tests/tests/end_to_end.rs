//! Full-system test: many producers, a pool of workers, one shared store.

use sequent_core::application::{
    shutdown_channel, ProducerService, SyncWaitConfig, Worker, WorkerConfig,
};
use sequent_core::port::{EventStore, SystemTimeProvider, WordPool};
use sequent_infra_sqlite::{create_pool, run_migrations, SqliteEventStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

const EVENTS: i64 = 20;
const WORKERS: usize = 3;

#[tokio::test]
async fn pool_of_workers_drains_concurrent_submissions() {
    let path = "/tmp/sequent_test_e2e.db";
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{path}{suffix}"));
    }

    let pool = create_pool(path).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let store: Arc<SqliteEventStore> =
        Arc::new(SqliteEventStore::new(pool, Arc::new(SystemTimeProvider)));

    let words: Vec<String> = vec!["agua".into(), "fogo".into(), "vento".into()];
    let results = Arc::new(WordPool::new(words.clone()));

    // Workers first; they idle until submissions arrive.
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let mut worker_handles = Vec::new();
    for _ in 0..WORKERS {
        let worker = Worker::new(
            store.clone(),
            results.clone(),
            WorkerConfig {
                idle_backoff: Duration::from_millis(10),
                error_backoff: Duration::from_millis(50),
                work_delay: Duration::from_millis(5),
            },
        );
        let token = shutdown_rx.clone();
        worker_handles.push(tokio::spawn(async move { worker.run(token).await }));
    }

    // Concurrent producers.
    let mut submissions = JoinSet::new();
    for _ in 0..EVENTS {
        let producer = ProducerService::new(store.clone(), SyncWaitConfig::default());
        submissions.spawn(async move { producer.submit_async().await.unwrap().id });
    }
    let mut ids = Vec::new();
    while let Some(result) = submissions.join_next().await {
        ids.push(result.unwrap());
    }
    ids.sort();
    assert_eq!(ids, (1..=EVENTS).collect::<Vec<i64>>());

    // Wait for the pool to drain everything.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        let mut done = 0;
        for id in 1..=EVENTS {
            if store.find_by_id(id).await.unwrap().unwrap().is_completed() {
                done += 1;
            }
        }
        if done == EVENTS {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "workers did not drain the queue: {done}/{EVENTS} completed"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Every value came from the configured pool; completion order is free
    // but every id completed exactly once.
    for id in 1..=EVENTS {
        let event = store.find_by_id(id).await.unwrap().unwrap();
        let value = event.value.unwrap();
        assert!(words.contains(&value), "value {value} not from pool");
    }
    assert_eq!(store.allocated_count().await.unwrap(), EVENTS);

    shutdown_tx.shutdown();
    for handle in worker_handles {
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("worker did not stop")
            .unwrap()
            .unwrap();
    }
}
