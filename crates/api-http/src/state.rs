//! Shared Application State

use sequent_core::application::{LookupService, ProducerService};
use std::sync::Arc;

/// Services the handlers need. Cloned per request via axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub producer: Arc<ProducerService>,
    pub lookup: Arc<LookupService>,
}

impl AppState {
    pub fn new(producer: Arc<ProducerService>, lookup: Arc<LookupService>) -> Self {
        Self { producer, lookup }
    }
}
