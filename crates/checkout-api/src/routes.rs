//! # Routes
//!
//! Axum router for the demo checkout server.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the application router
///
/// Routes:
///   - GET /        - Create the demo payment, 302 to the approval page
///   - GET /ok      - Gateway return URL: execute and verify
///   - GET /cancel  - Gateway cancel URL
///   - GET /health  - Health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::start_checkout))
        .route("/ok", get(handlers::checkout_return))
        .route("/cancel", get(handlers::checkout_cancel))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
