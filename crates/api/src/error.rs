use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wallbrowse_catalog::CatalogError;
use wallbrowse_core::error::CoreError;

/// Message sent when the catalog answered with an error status.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch wallpapers";

/// Message sent for every failure whose cause stays server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent `{"error","code"}` JSON
/// bodies. Upstream and internal causes are logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wallbrowse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the catalog service.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            AppError::Catalog(err) => classify_catalog_error(err),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a catalog error into an HTTP status, error code, and message.
///
/// - An upstream error status is mirrored with a fixed message.
/// - An upstream status outside 4xx/5xx becomes 502.
/// - Transport failures, timeouts and malformed bodies map to 500.
fn classify_catalog_error(err: &CatalogError) -> (StatusCode, &'static str, String) {
    match err {
        CatalogError::Status(code) => {
            let status = StatusCode::from_u16(*code)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            tracing::warn!(upstream_status = code, %status, "Catalog search failed");
            (status, "UPSTREAM_ERROR", UPSTREAM_ERROR_MESSAGE.to_string())
        }
        CatalogError::Timeout => {
            tracing::error!("Catalog search timed out");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Catalog search failed");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
