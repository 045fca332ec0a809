//! Gists Module
//!
//! Read-through access to an owner's GitHub gists, one page at a time.

pub mod github;
mod key;
mod model;
mod service;
mod upstream;

#[cfg(test)]
pub(crate) mod testing;

pub use github::GitHubClient;
pub use key::PageKey;
pub use model::{CachedPage, Gist, PageRequest, PageResult, Pagination, RawGist};
pub use service::{GistService, SharedPageCache};
pub use upstream::{GistSource, UpstreamFailure, UpstreamPage};

// == Public Constants ==
/// Page size used when the caller gives none
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page size the upstream accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Longest GitHub username
pub const MAX_OWNER_LENGTH: usize = 39;
