//! In-memory HTTP client for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::Result;
use crate::utils::http::{HttpClient, HttpResponse};

/// Landing page with a single BibTeX export link.
pub fn landing_page(bib_url: &str) -> String {
    format!(
        r#"<html><body><ul class="export">
        <li><a href="{bib_url}">download as .bib file</a></li>
        </ul></body></html>"#
    )
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// 429 with a `Retry-After` of `secs`.
    pub fn rate_limited(secs: u64) -> Self {
        Self::status(429).with_header("Retry-After", &secs.to_string())
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<String, VecDeque<MockResponse>>,
    requests: Vec<String>,
    body_reads: HashMap<String, Arc<AtomicUsize>>,
}

/// Serves queued responses per URL; the last queued response repeats.
/// Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state
            .routes
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn reset_route(&self, url: &str) {
        self.state.lock().unwrap().routes.remove(url);
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// How many response bodies for `url` were read.
    pub fn body_reads(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .body_reads
            .get(url)
            .map_or(0, |count| count.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(url.to_string());

        let response = match state.routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| MockResponse::status(404)),
            None => MockResponse::status(404),
        };
        let reads = Arc::clone(state.body_reads.entry(url.to_string()).or_default());

        Ok(Box::new(MockReply {
            url: url.to_string(),
            response,
            reads,
        }))
    }
}

struct MockReply {
    url: String,
    response: MockResponse,
    reads: Arc<AtomicUsize>,
}

#[async_trait]
impl HttpResponse for MockReply {
    fn status(&self) -> u16 {
        self.response.status
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.response
            .headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    async fn text(self: Box<Self>) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.body)
    }
}
