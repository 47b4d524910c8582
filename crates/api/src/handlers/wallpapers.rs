//! Handler for the wallpaper search proxy.
//!
//! Forwards the caller's filters to the catalog service with the server-held
//! credential attached, then relays the catalog's JSON body untouched.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use wallbrowse_core::error::CoreError;
use wallbrowse_core::search::SearchFilters;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/wallpapers
///
/// Accepts `page`, `seed`, `q`, `resolutions` and `categories`. Any other
/// query parameter, including `apikey` and `purity`, is ignored.
pub async fn search_wallpapers(
    State(state): State<AppState>,
    query: Result<Query<SearchFilters>, QueryRejection>,
) -> AppResult<Response> {
    let Query(filters) = query.map_err(|rejection| {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    })?;
    filters.validate()?;

    let body = state.catalog.search(&filters).await?;

    if state.catalog.api_key().appears_in(&body) {
        return Err(AppError::InternalError(
            "Catalog response echoed the API credential; refusing to relay it".to_string(),
        ));
    }

    tracing::debug!(
        page = filters.page_or_default(),
        bytes = body.len(),
        "Relaying catalog search page"
    );

    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
