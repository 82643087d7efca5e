//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::domain::{CurrencyCode, ParsedRate, RateObservation};
use rates_types::dto::{
    ConvertQuery, ConvertResponse, DownloadRatesResponse, ErrorResponse, FetchRatesResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
async fn health() {}

/// Fetch the central bank feed and store today's rates
#[utoipa::path(
    get,
    path = "/fetch-rates/",
    tag = "rates",
    responses(
        (status = 200, description = "Rates parsed from the feed", body = FetchRatesResponse),
        (status = 500, description = "Feed unavailable, malformed, or not stored", body = ErrorResponse)
    )
)]
async fn fetch_rates() {}

/// List every stored rate observation
#[utoipa::path(
    get,
    path = "/rates/",
    tag = "rates",
    responses(
        (status = 200, description = "All stored observations", body = Vec<RateObservation>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_rates() {}

/// Convert an amount using the latest stored rates
#[utoipa::path(
    get,
    path = "/convert/",
    tag = "conversion",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Converted amount", body = ConvertResponse),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 404, description = "No stored rate for a currency", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn convert() {}

/// Save the raw feed XML to disk
#[utoipa::path(
    get,
    path = "/download-rates/",
    tag = "rates",
    responses(
        (status = 200, description = "Feed written", body = DownloadRatesResponse),
        (status = 500, description = "Feed unavailable or file not written", body = ErrorResponse)
    )
)]
async fn download_rates() {}

/// OpenAPI documentation for the Exchange Rates API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exchange Rates Service API",
        version = "1.0.0",
        description = "Stores the Central Bank of the Republic of Turkey daily rates and converts between currencies.\n\nAll rates are quoted in the home currency (TRY by default), which converts at 1.0 without a stored row.",
        license(name = "MIT"),
    ),
    paths(health, fetch_rates, list_rates, convert, download_rates),
    components(
        schemas(
            CurrencyCode,
            ParsedRate,
            RateObservation,
            FetchRatesResponse,
            ConvertQuery,
            ConvertResponse,
            DownloadRatesResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Feed ingestion and stored rates"),
        (name = "conversion", description = "Currency conversion"),
    )
)]
pub struct ApiDoc;
