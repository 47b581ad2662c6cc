use std::sync::Arc;

use calmem_core::{ResourceService, Store};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    service: ResourceService,
}

impl AppState {
    /// Builds the process-wide store and the service that fronts it.
    pub fn new() -> Self {
        let store = Arc::new(Store::new());
        AppState {
            service: ResourceService::new(store),
        }
    }

    pub fn service(&self) -> &ResourceService {
        &self.service
    }
}
