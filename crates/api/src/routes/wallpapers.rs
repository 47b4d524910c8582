//! Route definitions for the wallpaper search proxy.
//!
//! Mounted at `/wallpapers` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::wallpapers;
use crate::state::AppState;

/// Wallpaper routes mounted at `/wallpapers`.
///
/// ```text
/// GET    /                      -> search_wallpapers
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(wallpapers::search_wallpapers))
}
