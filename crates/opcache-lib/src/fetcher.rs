//! HTTP sampling of the OPcache status endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, Result};
use crate::wire;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to query the status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// URL scheme, usually `http` or `https`
    pub protocol: String,
    /// Host, optionally with `:port`
    pub hostname: String,
    /// Path of the status script, e.g. `/opcache-status.php`
    pub path: String,
    /// Request timeout in seconds; 0 waits indefinitely
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn new(
        protocol: impl Into<String>,
        hostname: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            path: path.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Bound applied to the whole request, `None` when the timeout is 0
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// `protocol://hostname/path`; the leading `/` of `path` is optional
    pub fn url(&self) -> std::result::Result<Url, url::ParseError> {
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        Url::parse(&format!(
            "{}://{}{}{}",
            self.protocol, self.hostname, separator, self.path
        ))
    }
}

/// Raw HTTP exchange before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub http_status: u16,
    pub body: String,
}

impl RawResponse {
    /// `<body>|<status>`, the form printed in debug output
    pub fn transcript(&self) -> String {
        wire::transcript(&self.body, self.http_status)
    }
}

/// Source of OPcache status responses
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Human-readable location of the source
    fn location(&self) -> String;

    /// Perform one request
    async fn fetch(&self) -> Result<RawResponse>;
}

/// HTTP client for the status endpoint
pub struct HttpFetcher {
    client: Client,
    url: Url,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Create a new fetcher for the configured endpoint
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let url = config.url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            warn!(url = %self.url, timeout_secs = self.timeout_secs, "Request timed out");
            FetchError::Timeout(self.timeout_secs)
        } else {
            warn!(url = %self.url, error = %err, "Request failed");
            FetchError::Transport(err)
        }
    }
}

#[async_trait]
impl SampleSource for HttpFetcher {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<RawResponse> {
        debug!(url = %self.url, "Requesting OPcache status");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let http_status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(http_status, body_len = body.len(), "Received response");
        Ok(RawResponse { http_status, body })
    }
}
