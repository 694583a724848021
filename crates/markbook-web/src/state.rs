//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Duration;

use markbook_config::Config;

use crate::session::SessionStore;

/// Shared state injected into every axum handler.
pub struct AppState {
    /// In-memory gradebook sessions; the only mutable state in the process.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            sessions: SessionStore::new(Duration::from_secs(config.session.timeout_secs)),
        }
    }
}

pub type SharedState = Arc<AppState>;
