//! Response DTOs for the gist proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::gists::{Gist, PageResult, Pagination};

/// Service name reported by the health endpoints
pub const SERVICE_NAME: &str = "github-gists-api";

/// Cache provenance of a page response
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfo {
    /// Whether the page was served from the cache
    pub hit: bool,
    /// Lifetime of cached pages in seconds
    pub ttl: u64,
}

/// Response body for `GET /:username`
#[derive(Debug, Clone, Serialize)]
pub struct GistsResponse {
    pub data: Vec<Gist>,
    pub pagination: Pagination,
    pub cache: CacheInfo,
}

impl GistsResponse {
    /// Creates a GistsResponse from a service result
    pub fn new(result: PageResult, ttl: u64) -> Self {
        Self {
            data: result.items,
            pagination: result.pagination,
            cache: CacheInfo {
                hit: result.cache_hit,
                ttl,
            },
        }
    }
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of entries in cache
    pub size: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Hit rate (hits / (hits + misses)), 0 before any lookup
    pub hit_rate: f64,
    /// Lifetime of cached pages in seconds
    pub ttl_seconds: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats, ttl_seconds: u64) -> Self {
        Self {
            size: stats.size,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            ttl_seconds,
        }
    }
}

/// Response body for the clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for the health endpoints (GET / and GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Service name
    pub service: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
