//! Upstream failure taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching the upstream resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Configured URL could not be parsed.
    #[error("invalid upstream URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("failed to build upstream HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connect or total deadline exceeded.
    #[error("GET {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// DNS, connect or send failure.
    #[error("failed to GET {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with something other than 200.
    #[error("upstream returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body could not be read.
    #[error("failed to read upstream response body")]
    Body(#[source] reqwest::Error),

    /// Body is not a JSON array of objects.
    #[error("failed to parse JSON from upstream")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl { .. } => "invalid_url",
            FetchError::Client(_) => "client",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Transport { .. } => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Body(_) => "body",
            FetchError::Parse(_) => "parse",
        }
    }

    /// This error followed by every underlying cause, joined with ": ".
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        message
    }
}
