//! # Rates Client SDK
//!
//! A typed Rust client for the Exchange Rates API.

use rates_types::{ConvertResponse, DownloadRatesResponse, FetchRatesResponse, RateObservation};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exchange Rates API client.
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Fetches today's feed on the server and stores new rates.
    pub async fn fetch_rates(&self) -> Result<FetchRatesResponse, ClientError> {
        self.get("/fetch-rates/", &[]).await
    }

    /// Lists every stored rate observation.
    pub async fn list_rates(&self) -> Result<Vec<RateObservation>, ClientError> {
        self.get("/rates/", &[]).await
    }

    /// Converts `amount` from one currency to another using the latest stored rates.
    pub async fn convert(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<ConvertResponse, ClientError> {
        let amount = amount.to_string();
        self.get(
            "/convert/",
            &[
                ("amount", amount.as_str()),
                ("from_currency", from_currency),
                ("to_currency", to_currency),
            ],
        )
        .await
    }

    /// Asks the server to save the raw feed XML to its configured file.
    pub async fn download_rates(&self) -> Result<DownloadRatesResponse, ClientError> {
        self.get("/download-rates/", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
