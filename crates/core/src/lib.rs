//! Shared domain types for the wallpaper browser.
//!
//! Zero internal dependencies so both the proxy server and the client can
//! use the same filter and result-page definitions.

pub mod error;
pub mod search;
pub mod wallpaper;
