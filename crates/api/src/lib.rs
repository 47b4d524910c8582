//! Wallpaper search proxy server library.
//!
//! Exposes config, state, error handling and routes so integration tests and
//! the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
