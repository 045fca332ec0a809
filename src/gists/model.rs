//! Gist page data model
//!
//! Upstream (raw) records, their normalized form, and the page shapes the
//! service hands back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gists::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

// == Raw Gist ==
/// A gist as returned by the GitHub API. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    pub created_at: String,
    #[serde(default)]
    pub files: BTreeMap<String, Value>,
}

// == Gist ==
/// Normalized gist record returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    pub description: Option<String>,
    pub url: String,
    pub created_at: String,
    /// Filename to file metadata, passed through untouched
    pub files: BTreeMap<String, Value>,
}

impl From<RawGist> for Gist {
    fn from(raw: RawGist) -> Self {
        Self {
            id: raw.id,
            description: raw.description,
            url: raw.html_url,
            created_at: raw.created_at,
            files: raw.files,
        }
    }
}

// == Pagination ==
/// Page shape derived from the upstream continuation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

// == Page Request ==
/// Coordinates of one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    owner: String,
    page: u32,
    per_page: u32,
    use_cache: bool,
}

impl PageRequest {
    /// Creates a cache-enabled request.
    ///
    /// Out-of-range numbers are clamped rather than rejected: `page` to at
    /// least 1 and `per_page` into `1..=MAX_PER_PAGE`. Callers are expected to
    /// validate before this point.
    pub fn new(owner: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            owner: owner.into(),
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
            use_cache: true,
        }
    }

    /// First page at the default page size.
    pub fn first_page(owner: impl Into<String>) -> Self {
        Self::new(owner, 1, DEFAULT_PER_PAGE)
    }

    /// Sets whether a cached page may be served.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }
}

// == Cached Page ==
/// What the cache stores for one page key.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage {
    pub items: Vec<Gist>,
    pub pagination: Pagination,
}

// == Page Result ==
/// One page of gists plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<Gist>,
    pub pagination: Pagination,
    pub cache_hit: bool,
}

impl PageResult {
    pub fn from_cache(page: CachedPage) -> Self {
        Self {
            items: page.items,
            pagination: page.pagination,
            cache_hit: true,
        }
    }

    pub fn fresh(page: CachedPage) -> Self {
        Self {
            items: page.items,
            pagination: page.pagination,
            cache_hit: false,
        }
    }
}
