// Library root - exports for the binary and integration tests

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use config::{Config, EventHubSettings};
pub use server::create_router;

use std::sync::Arc;

use services::ProducerFactory;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub producers: Arc<dyn ProducerFactory>,
}

impl AppState {
    pub fn new(config: Config, producers: Arc<dyn ProducerFactory>) -> Self {
        Self {
            config: Arc::new(config),
            producers,
        }
    }
}
