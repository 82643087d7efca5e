//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use rates_types::{FeedSource, RateRepository};

use super::handlers::{self, AppState};
use crate::RateService;

/// HTTP Server for the Exchange Rates API.
pub struct HttpServer<R: RateRepository, F: FeedSource> {
    state: Arc<AppState<R, F>>,
}

impl<R: RateRepository, F: FeedSource> HttpServer<R, F> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RateService<R, F>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/openapi.json", get(handlers::openapi))
            .route("/fetch-rates/", get(handlers::fetch_rates::<R, F>))
            .route("/rates/", get(handlers::list_rates::<R, F>))
            .route("/convert/", get(handlers::convert::<R, F>))
            .route("/download-rates/", get(handlers::download_rates::<R, F>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
