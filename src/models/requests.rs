//! Request DTOs for the gist proxy API
//!
//! Defines the query parameters accepted by the gists endpoint.

use serde::Deserialize;

use crate::gists::{PageRequest, DEFAULT_PER_PAGE, MAX_OWNER_LENGTH, MAX_PER_PAGE};

/// Query string for `GET /:username`
///
/// # Fields
/// - `page`: 1-based page number (default 1)
/// - `per_page`: page size, 1 to 100 (default 30)
/// - `use_cache`: set to false to force an upstream fetch (default true)
#[derive(Debug, Clone, Deserialize)]
pub struct GistsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_use_cache() -> bool {
    true
}

impl Default for GistsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            use_cache: default_use_cache(),
        }
    }
}

impl GistsQuery {
    /// Validates the query together with the path username
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, username: &str) -> Option<String> {
        let len = username.chars().count();
        if len == 0 {
            return Some("Username cannot be empty".to_string());
        }
        if len > MAX_OWNER_LENGTH {
            return Some(format!(
                "Username exceeds maximum length of {} characters",
                MAX_OWNER_LENGTH
            ));
        }
        if self.page < 1 {
            return Some("page must be at least 1".to_string());
        }
        if self.per_page < 1 || self.per_page > MAX_PER_PAGE {
            return Some(format!("per_page must be between 1 and {}", MAX_PER_PAGE));
        }
        None
    }

    /// Builds the service request for `username`.
    pub fn to_page_request(&self, username: impl Into<String>) -> PageRequest {
        PageRequest::new(username, self.page, self.per_page).with_cache(self.use_cache)
    }
}
