//! Single-shot fetch of the upstream user collection.
//!
//! # Responsibilities
//! - Own one pooled HTTP client configured with connect and total deadlines
//! - Issue one GET per call, no retries
//! - Classify failures (timeout, transport, status, body, parse)
//!
//! # Design Decisions
//! - Only 200 counts as success; other 2xx codes are failures
//! - Failed bodies are truncated before they reach the log
//! - The request future is owned by the caller; dropping it aborts the request

use std::time::Instant;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::FetchError;
use crate::upstream::types::UserCollection;

/// Fetches the user collection from the configured upstream URL.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: Client,
    url: Url,
    timeout_ms: u64,
    max_error_body_bytes: usize,
}

impl UpstreamFetcher {
    /// Create a fetcher from configuration.
    ///
    /// The underlying client is built once and reused, so connections to the
    /// upstream are pooled across requests.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let url = Url::parse(&config.url).map_err(|source| FetchError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url,
            timeout_ms: config.timeout_ms,
            max_error_body_bytes: config.max_error_body_bytes,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch and decode the upstream collection.
    pub async fn fetch(&self) -> Result<UserCollection, FetchError> {
        let start = Instant::now();
        let result = self.fetch_once().await;

        match &result {
            Ok(users) => {
                tracing::debug!(
                    url = %self.url,
                    records = users.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream fetch succeeded"
                );
                metrics::record_upstream_fetch("ok", start);
            }
            Err(e) => metrics::record_upstream_fetch(e.kind(), start),
        }

        result
    }

    async fn fetch_once(&self) -> Result<UserCollection, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match read_excerpt(response, self.max_error_body_bytes).await {
                Ok(text) => text,
                Err(e) => format!("<unreadable body: {e}>"),
            };
            return Err(FetchError::Status { status, body });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                FetchError::Body(e)
            }
        })?;

        parse_users(&body)
    }

    fn send_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            self.timeout_error()
        } else {
            FetchError::Transport {
                url: self.url.to_string(),
                source: error,
            }
        }
    }

    fn timeout_error(&self) -> FetchError {
        FetchError::Timeout {
            url: self.url.to_string(),
            timeout_ms: self.timeout_ms,
        }
    }
}

/// Decode an upstream body as a JSON array of objects.
pub fn parse_users(body: &[u8]) -> Result<UserCollection, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Read at most `limit` bytes of a body; the rest is never buffered.
async fn read_excerpt(mut response: Response, limit: usize) -> Result<String, reqwest::Error> {
    let mut buf = Vec::new();
    let mut truncated = false;

    while let Some(chunk) = response.chunk().await? {
        let room = limit - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            truncated = true;
            break;
        }
        buf.extend_from_slice(&chunk);
    }

    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if truncated {
        text.push_str("...");
    }
    Ok(text)
}
