use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;

/// Create a minimal router without state (health probes only)
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no state needed)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints
        .nest("/api/auth", auth::create_auth_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
