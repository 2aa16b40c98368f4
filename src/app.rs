use std::sync::Arc;

use crate::config;
use crate::directory::{InMemoryDirectory, UserDirectory};

/// Shared application state, cloned into every actix worker.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub directory: Arc<dyn UserDirectory>,
}

impl App {
    /// Builds the stock deployment: the seeded in-memory directory.
    #[tracing::instrument(skip_all)]
    pub fn new(config: config::Server) -> Self {
        Self::with_directory(config, Arc::new(InMemoryDirectory::seeded()))
    }

    /// Builds the app around any user store. The validation logic never
    /// learns which one it got.
    pub fn with_directory(config: config::Server, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            config: Arc::new(config),
            directory,
        }
    }
}
