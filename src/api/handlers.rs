//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::gists::{GistService, GitHubClient};
use crate::models::{ClearResponse, GistsQuery, GistsResponse, HealthResponse, StatsResponse};

/// Owner whose path collides with the cache admin route.
const CACHE_OWNER: &str = "cache";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: GistService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: GistService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the page cache and a GitHub client from the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(RwLock::new(CacheStore::new(config.cache_ttl)));
        let client = GitHubClient::from_config(config)?;
        Ok(Self::new(GistService::new(cache, Arc::new(client))))
    }
}

/// Handler for GET /:username
///
/// Returns one page of the user's public gists.
pub async fn gists_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    query: std::result::Result<Query<GistsQuery>, QueryRejection>,
) -> Result<Json<GistsResponse>> {
    fetch_gists(state, username, query).await
}

/// Handler for GET /cache
///
/// The static `/cache` route would otherwise shadow the owner named "cache".
pub async fn cache_owner_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<GistsQuery>, QueryRejection>,
) -> Result<Json<GistsResponse>> {
    fetch_gists(state, CACHE_OWNER.to_string(), query).await
}

async fn fetch_gists(
    state: AppState,
    username: String,
    query: std::result::Result<Query<GistsQuery>, QueryRejection>,
) -> Result<Json<GistsResponse>> {
    // Unparseable query values are validation failures like out-of-range ones
    let Query(query) = query.map_err(|rejection| ProxyError::InvalidRequest(rejection.body_text()))?;

    if let Some(error_msg) = query.validate(&username) {
        return Err(ProxyError::InvalidRequest(error_msg));
    }

    let result = state
        .service
        .fetch_page(&query.to_page_request(username))
        .await?;
    let ttl = state.service.cache_ttl().await;

    Ok(Json(GistsResponse::new(result, ttl)))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.cache_stats().await;
    let ttl = state.service.cache_ttl().await;

    Json(StatsResponse::new(stats, ttl))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.service.clear_cache().await;
    Json(ClearResponse::cleared())
}

/// Handler for GET / and GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
