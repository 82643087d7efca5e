//! # Rates Feed
//!
//! Outbound adapter for the Central Bank of the Republic of Turkey daily
//! rate feed.
//!
//! - [`TcmbFeedClient`] implements the `FeedSource` port with a single GET.
//! - [`parse_feed`] turns the raw XML into a flat list of `ParsedRate`s.
//!
//! ```ignore
//! let client = TcmbFeedClient::new(DEFAULT_FEED_URL);
//! let bytes = client.fetch_feed().await?;
//! let rates = parse_feed(&bytes, chrono::Local::now().date_naive())?;
//! ```

mod client;
mod parser;

pub use client::{DEFAULT_FEED_URL, TcmbFeedClient};
pub use parser::parse_feed;
