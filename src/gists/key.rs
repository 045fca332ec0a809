//! Cache key derivation for gist pages.

use std::fmt;

/// Prefix for all gist page keys.
const KEY_PREFIX: &str = "gists";

/// Identifies one cached page of an owner's gists.
///
/// Only the page coordinates take part; whether the caller bypassed the cache
/// does not, so every caller asking for the same page shares one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    owner: String,
    page: u32,
    per_page: u32,
}

impl PageKey {
    pub fn new(owner: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            owner: owner.into(),
            page,
            per_page,
        }
    }
}

/// Renders as `gists:{owner_len}:{owner}:{page}:{per_page}`.
///
/// The byte-length prefix delimits the owner, so an owner containing `:` or
/// digits can never alias a different tuple.
impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            KEY_PREFIX,
            self.owner.len(),
            self.owner,
            self.page,
            self.per_page
        )
    }
}
