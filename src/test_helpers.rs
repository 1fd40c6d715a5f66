//! Shared test doubles for the [`HttpClient`] seam.

use crate::error::{Error, Result};
use crate::transport::{HttpClient, RawResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Serves canned responses by exact URL and records every request.
/// Unknown URLs fail like a refused connection.
#[derive(Default)]
pub(crate) struct RecordingClient {
    responses: HashMap<String, RawResponse>,
    requests: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn execute_get(&self, url: Url) -> Result<RawResponse> {
        let url = url.to_string();
        self.requests.lock().unwrap().push(url.clone());

        match self.responses.get(&url) {
            Some(response) => Ok(response.clone()),
            None => Err(Error::RequestFailed {
                url,
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Never completes, for cancellation and deadline tests.
pub(crate) struct HangingClient;

#[async_trait]
impl HttpClient for HangingClient {
    async fn execute_get(&self, _url: Url) -> Result<RawResponse> {
        std::future::pending().await
    }
}

/// Connects but fails while draining the body.
pub(crate) struct BrokenBodyClient;

#[async_trait]
impl HttpClient for BrokenBodyClient {
    async fn execute_get(&self, url: Url) -> Result<RawResponse> {
        Err(Error::ResponseReadFailed {
            url: url.to_string(),
            reason: "connection reset by peer".to_string(),
        })
    }
}

/// Panics on any request, for asserting that no I/O happens.
pub(crate) struct UnreachableClient;

#[async_trait]
impl HttpClient for UnreachableClient {
    async fn execute_get(&self, url: Url) -> Result<RawResponse> {
        panic!("unexpected request to {url}");
    }
}
