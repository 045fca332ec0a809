//! Upstream fetch capability
//!
//! The service only knows this trait; how pages are actually fetched
//! (HTTP, auth, link headers) lives in the implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::gists::RawGist;

/// One page as reported by the upstream source.
#[derive(Debug, Clone, Default)]
pub struct UpstreamPage {
    pub items: Vec<RawGist>,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Ways an upstream fetch can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    #[error("owner not found")]
    NotFound,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("{0}")]
    Other(String),
}

/// Fetches one page of an owner's gists.
#[async_trait]
pub trait GistSource: Send + Sync {
    async fn fetch_gists(
        &self,
        owner: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UpstreamPage, UpstreamFailure>;
}
