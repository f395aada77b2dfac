//! HTTP fetch pipeline for the race page.
//!
//! - Redirects limited (default 5), compressed bodies decoded.
//! - Max body bytes: 5MB (configurable).
//! - Non-success statuses are errors; nothing is retried.
//! - Requests are raced against a cancellation token so shutdown never waits
//!   for a slow server.

use async_trait::async_trait;
use bytes::Bytes;
use lmu_races_core::{AppConfig, Error};
use reqwest::{Client, header};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Source of raw page bytes.
///
/// The refresh scheduler only sees this trait, so tests can swap in canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url`, giving up with `Error::Cancelled` as soon as `cancel` fires.
    async fn fetch_page(&self, url: &Url, cancel: &CancellationToken) -> Result<Bytes, Error>;
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "lmu-races/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "lmu-races/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Self::default()
        }
    }
}

/// HTTP fetch client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning the raw body.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), bytes.len());

        Ok(bytes)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::FetchTimeout(format!("no response within {}ms", self.config.timeout.as_millis()))
        } else {
            Error::HttpError(format!("network error: {}", err))
        }
    }
}

#[async_trait]
impl PageSource for FetchClient {
    async fn fetch_page(&self, url: &Url, cancel: &CancellationToken) -> Result<Bytes, Error> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.fetch(url) => result,
        }
    }
}
