//! GitHub gists client
//!
//! `GistSource` implementation over the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::gists::{GistSource, RawGist, UpstreamFailure, UpstreamPage};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("gist-proxy/", env!("CARGO_PKG_VERSION"));

// == GitHub Client ==
/// HTTP client for `GET /users/{owner}/gists`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    /// Creates a client against `base_url` (e.g. `https://api.github.com`).
    ///
    /// # Arguments
    /// * `base_url` - API root
    /// * `token` - Optional bearer token, raises the upstream rate limit
    /// * `timeout` - Whole-request timeout
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProxyError::Internal(format!("invalid GitHub API url '{}': {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ProxyError::Internal("GitHub token is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Creates a client from the server configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.github_api_url,
            config.github_token.as_deref(),
            Duration::from_secs(config.upstream_timeout),
        )
    }

    fn gists_url(&self, owner: &str, page: u32, per_page: u32) -> std::result::Result<Url, UpstreamFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamFailure::Other(format!("cannot use '{}' as a base url", self.base_url)))?
            .pop_if_empty()
            .extend(["users", owner, "gists"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl GistSource for GitHubClient {
    async fn fetch_gists(
        &self,
        owner: &str,
        page: u32,
        per_page: u32,
    ) -> std::result::Result<UpstreamPage, UpstreamFailure> {
        let url = self.gists_url(owner, page, per_page)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(transport_failure)?;

        let status = response.status();
        if let Some(failure) = classify_status(status) {
            return Err(failure);
        }

        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let items: Vec<RawGist> = response.json().await.map_err(transport_failure)?;

        Ok(UpstreamPage {
            items,
            has_next: link_has_rel(&link, "next"),
            has_prev: link_has_rel(&link, "prev") || page > 1,
        })
    }
}

// == Response Classification ==
/// Maps a non-success status onto a failure kind; `None` for 2xx.
fn classify_status(status: StatusCode) -> Option<UpstreamFailure> {
    match status {
        s if s.is_success() => None,
        StatusCode::NOT_FOUND => Some(UpstreamFailure::NotFound),
        // GitHub signals an exhausted quota with 403 as well as 429
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Some(UpstreamFailure::RateLimited),
        s => Some(UpstreamFailure::Status(s.as_u16())),
    }
}

fn transport_failure(err: reqwest::Error) -> UpstreamFailure {
    if err.is_timeout() {
        UpstreamFailure::Timeout
    } else {
        UpstreamFailure::Other(err.to_string())
    }
}

/// Returns true if an RFC 8288 `Link` header carries a link with relation `rel`.
///
/// Example: `<https://api.github.com/user/1/gists?page=2>; rel="next", <...>; rel="last"`
pub fn link_has_rel(header: &str, rel: &str) -> bool {
    header.split(',').any(|link| {
        link.split(';').skip(1).any(|param| {
            let Some((name, value)) = param.split_once('=') else {
                return false;
            };
            name.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case(rel))
        })
    })
}
