//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ParsedRate;

// ─────────────────────────────────────────────────────────────────────────────
// Ingest DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response after fetching and storing the feed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FetchRatesResponse {
    #[schema(example = "Exchange rates fetched and stored successfully")]
    pub message: String,
    /// Every rate parsed from the feed, including ones already stored today
    pub data: Vec<ParsedRate>,
}

/// Response after saving the raw feed to disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DownloadRatesResponse {
    #[schema(example = "Exchange rates XML downloaded successfully")]
    pub message: String,
    /// Absolute path of the written file
    #[schema(example = "/srv/rates/exchange_rates.xml")]
    pub file_path: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for a conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Amount in `from_currency`
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(example = "USD")]
    pub from_currency: String,
    #[schema(example = "TRY")]
    pub to_currency: String,
}

/// Result of a conversion, echoing the request parameters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(example = "USD")]
    pub from_currency: String,
    #[schema(example = "TRY")]
    pub to_currency: String,
    #[schema(example = 2.919611)]
    pub converted_amount: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error body
// ─────────────────────────────────────────────────────────────────────────────

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Currency code not found: XXX")]
    pub error: String,
    #[schema(example = 404)]
    pub code: u16,
}
