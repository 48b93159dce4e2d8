use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data source error: {0}")]
    Source(#[from] database::DbError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Source(source_err) => {
                tracing::error!(error = ?source_err, "Data source error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load the daily records".to_string(),
                )
            }
            // The input is valid but the metrics cannot be computed for it; the
            // message names the undefined metric and is safe to show.
            AppError::Analytics(analytics_err) => {
                tracing::warn!(error = %analytics_err, "Metrics are undefined for this window.");
                (StatusCode::UNPROCESSABLE_ENTITY, analytics_err.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
