//! Shared application state for the web server.

use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::fs_manager::PathManager;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub paths: PathManager,
    /// No completion API key configured
    pub demo_mode: bool,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, paths: PathManager, demo_mode: bool) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            paths,
            demo_mode,
        }
    }
}

pub type SharedState = Arc<AppState>;
