//! Gist Proxy - A read-through caching proxy for GitHub gists
//!
//! Serves pages of a user's public gists, backed by an in-memory TTL cache
//! so repeated requests do not reach the GitHub API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gists;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::ProxyError;
pub use gists::{GistService, PageRequest, PageResult};
pub use tasks::spawn_cleanup_task;
