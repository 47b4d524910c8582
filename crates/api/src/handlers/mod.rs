//! Request handlers.
//!
//! Handlers delegate to the catalog client held in [`AppState`] and map
//! errors via [`AppError`].
//!
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

pub mod wallpapers;
