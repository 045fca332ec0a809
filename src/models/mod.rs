//! Request and Response models for the gist proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::GistsQuery;
pub use responses::{
    CacheInfo, ClearResponse, GistsResponse, HealthResponse, StatsResponse, SERVICE_NAME,
};
