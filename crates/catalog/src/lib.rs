//! REST client for the wallpaper catalog service.
//!
//! Wraps the catalog's search endpoint, injecting the server-held
//! credential and the fixed content-safety level on every request.

pub mod api;
pub mod credential;

pub use api::{CatalogClient, CatalogError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use credential::ApiKey;
