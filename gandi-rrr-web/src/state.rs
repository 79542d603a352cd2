//! Shared application state

use std::sync::Arc;

use gandi_rrr_core::{Config, DomainService};

/// Read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub domains: Arc<DomainService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, domains: Arc<DomainService>) -> Self {
        Self { config, domains }
    }
}
