//! HTTP client for the remote feed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use rates_types::{FeedError, FeedSource};

/// Today's rates as published by the TCMB.
pub const DEFAULT_FEED_URL: &str = "https://www.tcmb.gov.tr/kurlar/today.xml";

/// Fetches the feed document from a fixed URL.
pub struct TcmbFeedClient {
    url: String,
    http: Client,
}

impl TcmbFeedClient {
    /// Creates a client with reqwest's default settings (no timeout).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }

    /// Returns the feed URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for TcmbFeedClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_feed(&self) -> Result<Vec<u8>, FeedError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Unavailable(format!(
                "Feed responded with {}",
                status
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        tracing::debug!(bytes = body.len(), "Feed downloaded");
        Ok(body.to_vec())
    }
}
