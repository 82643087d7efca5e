//! # Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Create the feed client and rate service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_feed::TcmbFeedClient;
use rates_hex::{RateService, inbound::HttpServer};
use rates_repo::build_repo;

use config::{Config, LogFormat};

fn init_tracing(format: LogFormat) {
    let json = (format == LogFormat::Json).then(|| tracing_subscriber::fmt::layer().json());
    let text = (format == LogFormat::Text).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(json)
        .with(text)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting exchange rates server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!(
        feed_url = %config.feed_url,
        timeout_secs = config.feed_timeout.as_secs(),
        home_currency = %config.home_currency,
        "Using rate feed"
    );

    // Build repository (handles connection and schema)
    let repo = build_repo(&config.database_url).await?;

    let feed = TcmbFeedClient::with_timeout(config.feed_url, config.feed_timeout)?;

    let service =
        RateService::new(repo, feed, config.home_currency).with_download_path(config.download_path);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
