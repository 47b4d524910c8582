//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! catalog is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use wallbrowse_api::error::AppError;
use wallbrowse_catalog::CatalogError;
use wallbrowse_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: upstream error statuses are mirrored with a fixed message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_status_is_mirrored() {
    for code in [400u16, 401, 404, 429, 500, 503] {
        let (status, json) = error_to_response(CatalogError::Status(code).into()).await;

        assert_eq!(status.as_u16(), code);
        assert_eq!(json["code"], "UPSTREAM_ERROR");
        assert_eq!(json["error"], "Failed to fetch wallpapers");
    }
}

// ---------------------------------------------------------------------------
// Test: a non-error upstream status becomes 502
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_error_upstream_status_becomes_bad_gateway() {
    let (status, json) = error_to_response(CatalogError::Status(304).into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

// ---------------------------------------------------------------------------
// Test: timeout surfaces like any other internal failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timeout_returns_500() {
    let (status, json) = error_to_response(CatalogError::Timeout.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Internal server error");
}

// ---------------------------------------------------------------------------
// Test: malformed upstream body returns 500 without parser details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_returns_500_and_sanitizes() {
    let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    let (status, json) = error_to_response(CatalogError::Malformed(parse_err).into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert!(!json.to_string().contains("expected value"));
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("page must be a positive integer".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "page must be a positive integer");
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret catalog credential leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(
        !json.to_string().contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "Internal server error");
}
