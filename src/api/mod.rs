//! API Module
//!
//! HTTP handlers and routing for the gist proxy REST API.
//!
//! # Endpoints
//! - `GET /` and `GET /health` - Health check
//! - `GET /:username` - Page of a user's gists (`page`, `per_page`, `use_cache`)
//! - `GET /cache/stats` - Cache statistics
//! - `DELETE /cache` - Clear the cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
