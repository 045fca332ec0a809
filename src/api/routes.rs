//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_owner_handler, clear_handler, gists_handler, health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` and `GET /health` - Health check
/// - `GET /cache/stats` - Cache statistics
/// - `DELETE /cache` - Clear the cache
/// - `GET /:username` - One page of a user's gists
///
/// `GET /cache` serves the gists of the user named "cache"; only `DELETE`
/// on that path clears the cache.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache", get(cache_owner_handler).delete(clear_handler))
        .route("/:username", get(gists_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
