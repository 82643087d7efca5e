//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use rates_types::{
    AppError, ConvertQuery, ConvertResponse, DownloadRatesResponse, ErrorResponse,
    FetchRatesResponse, FeedSource, RateRepository,
};

use crate::RateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: RateRepository, F: FeedSource> {
    pub service: RateService<R, F>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::CurrencyNotFound(_) => StatusCode::NOT_FOUND,
            AppError::FeedUnavailable(_)
            | AppError::MalformedFeed(_)
            | AppError::Persistence(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::warn!(error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fetch the remote feed and store today's rates.
#[tracing::instrument(skip(state))]
pub async fn fetch_rates<R: RateRepository, F: FeedSource>(
    State(state): State<Arc<AppState<R, F>>>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.service.fetch_and_store().await?;
    Ok(Json(FetchRatesResponse {
        message: "Exchange rates fetched and stored successfully".into(),
        data,
    }))
}

/// List all stored rates.
#[tracing::instrument(skip(state))]
pub async fn list_rates<R: RateRepository, F: FeedSource>(
    State(state): State<Arc<AppState<R, F>>>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state.service.list_rates().await?;
    Ok(Json(rates))
}

/// Convert an amount between two currencies.
#[tracing::instrument(skip_all)]
pub async fn convert<R: RateRepository, F: FeedSource>(
    State(state): State<Arc<AppState<R, F>>>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!(
        amount = query.amount,
        from = %query.from_currency,
        to = %query.to_currency,
        "Converting"
    );

    let converted_amount = state
        .service
        .convert(query.amount, &query.from_currency, &query.to_currency)
        .await?;

    Ok(Json(ConvertResponse {
        amount: query.amount,
        from_currency: query.from_currency,
        to_currency: query.to_currency,
        converted_amount,
    }))
}

/// Save the raw feed to the configured file.
#[tracing::instrument(skip(state))]
pub async fn download_rates<R: RateRepository, F: FeedSource>(
    State(state): State<Arc<AppState<R, F>>>,
) -> Result<impl IntoResponse, ApiError> {
    let path = state.service.download_feed().await?;
    Ok(Json(DownloadRatesResponse {
        message: "Exchange rates XML downloaded successfully".into(),
        file_path: path.display().to_string(),
    }))
}
