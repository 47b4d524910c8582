pub mod health;
pub mod wallpapers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /wallpapers                search proxy (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/wallpapers", wallpapers::router())
}
