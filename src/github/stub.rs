// src/github/stub.rs
// In-memory Transport for tests: canned responses per URL, call counting.
// URLs without (remaining) canned responses answer 404, like an unknown ref.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::fetch::{FetchError, RawResponse, Transport};

#[derive(Debug, Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<RawResponse, FetchError>>>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // Queues responses for `url`, served one per request in order
    pub fn route(self, url: &str, responses: Vec<Result<RawResponse, FetchError>>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .extend(responses);
        self
    }

    // Serves `body` with 200 for every request to `url`
    pub fn always_ok(self, url: &str, body: &str, times: usize) -> Self {
        let responses = (0..times)
            .map(|_| Ok(RawResponse::new(StatusCode::OK, body)))
            .collect();
        self.route(url, responses)
    }

    pub fn calls(&self, url: &str) -> u32 {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;

        self.routes
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Ok(RawResponse::new(
                    StatusCode::NOT_FOUND,
                    r#"{"message":"Not Found"}"#,
                ))
            })
    }
}
