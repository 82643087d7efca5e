//! Rate feed port.
//!
//! Implementations can be HTTP clients, fixtures, etc.

use crate::error::FeedError;

/// Port trait for the remote XML rate feed.
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync + 'static {
    /// Fetches the raw feed document.
    ///
    /// Fails with [`FeedError::Unavailable`] on transport errors or a
    /// non-success status. No retries.
    async fn fetch_feed(&self) -> Result<Vec<u8>, FeedError>;
}
