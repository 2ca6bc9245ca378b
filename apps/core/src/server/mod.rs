//! Axum router: maps URL paths to handlers.

pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub use state::{AppState, SharedState};

/// Directory served under `/static`; `index.html` is also served at `/`.
pub const STATIC_DIR: &str = "static";

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // API
        .route("/api/chat", post(handlers::chat))
        .route("/api/upload", post(handlers::upload))
        .route("/api/status", get(handlers::status))
        .route("/api/conversations/{session_id}", get(handlers::conversations))
        .route("/health", get(handlers::health))
        // Static files
        .route_service("/", ServeFile::new(format!("{}/index.html", STATIC_DIR)))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
