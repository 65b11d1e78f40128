//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::assistant::Assistant;
use crate::config::ServerConfig;
use crate::content::Catalog;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Page content
    pub catalog: Arc<Catalog>,
    /// Assistant services over the hosted model
    pub assistant: Arc<Assistant>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(catalog: Catalog, assistant: Assistant, config: ServerConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            assistant: Arc::new(assistant),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
