//! In-memory `GistSource` for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::gists::{GistSource, RawGist, UpstreamFailure, UpstreamPage};

pub fn raw_gist(id: &str) -> RawGist {
    let mut files = BTreeMap::new();
    files.insert(
        format!("{}.rs", id),
        json!({ "filename": format!("{}.rs", id), "language": "Rust", "size": 42 }),
    );
    RawGist {
        id: id.to_string(),
        description: Some(format!("gist {}", id)),
        html_url: format!("https://gist.github.com/{}", id),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        files,
    }
}

/// Canned upstream that records how it was called.
#[derive(Debug)]
pub struct StubSource {
    response: Mutex<Result<UpstreamPage, UpstreamFailure>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, u32, u32)>>,
}

impl StubSource {
    pub fn with_items(count: usize, has_next: bool, has_prev: bool) -> Self {
        Self {
            response: Mutex::new(Ok(page_of(count, has_next, has_prev))),
            delay: None,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn failing(failure: UpstreamFailure) -> Self {
        let stub = Self::with_items(0, false, false);
        *stub.response.lock().unwrap() = Err(failure);
        stub
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_items(&self, count: usize, has_next: bool, has_prev: bool) {
        *self.response.lock().unwrap() = Ok(page_of(count, has_next, has_prev));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, u32, u32)> {
        self.last_call.lock().unwrap().clone()
    }
}

fn page_of(count: usize, has_next: bool, has_prev: bool) -> UpstreamPage {
    UpstreamPage {
        items: (0..count).map(|i| raw_gist(&format!("gist-{}", i))).collect(),
        has_next,
        has_prev,
    }
}

#[async_trait]
impl GistSource for StubSource {
    async fn fetch_gists(
        &self,
        owner: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UpstreamPage, UpstreamFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((owner.to_string(), page, per_page));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.response.lock().unwrap().clone()
    }
}
