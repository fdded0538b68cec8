use mergington_core::Registry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state passed to all route handlers.
///
/// The registry lives behind a single-writer lock: signup and unregister take
/// the write side, listing takes the read side.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}
