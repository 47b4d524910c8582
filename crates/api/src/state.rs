use std::sync::Arc;

use wallbrowse_catalog::CatalogClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upstream catalog client (pooled connections).
    pub catalog: Arc<CatalogClient>,
}

impl AppState {
    /// Build state from configuration, constructing the catalog client.
    pub fn from_config(config: ServerConfig) -> Result<Self, wallbrowse_catalog::CatalogError> {
        let catalog = CatalogClient::new(
            config.catalog.base_url.clone(),
            config.catalog.api_key.clone(),
            std::time::Duration::from_secs(config.catalog.timeout_secs),
            config.catalog.max_retries,
        )?;

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        })
    }
}
