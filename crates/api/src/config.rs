use std::path::PathBuf;
use std::str::FromStr;

use wallbrowse_catalog::{ApiKey, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CATALOG_API_KEY (or CATALOG_API_KEY_FILE) must be set to a non-empty value")]
    MissingApiKey,

    #[error("Failed to read CATALOG_API_KEY_FILE at {}: {source}", .path.display())]
    ApiKeyFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Upstream catalog settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root (default: `https://wallhaven.cc/api/v1`).
    pub base_url: String,
    /// Server-held credential. Redacted in `Debug` output.
    pub api_key: ApiKey,
    /// Upstream request timeout in seconds (default: `10`).
    pub timeout_secs: u64,
    /// Retries when the upstream connection cannot be made (default: `1`).
    pub max_retries: u32,
}

/// Server configuration loaded from environment variables.
///
/// Everything except the catalog credential has a default suitable for local
/// development. Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding a built front-end bundle, served for unmatched paths.
    pub static_dir: Option<PathBuf>,
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `0.0.0.0`                     |
    /// | `PORT`                 | `3000`                        |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `STATIC_DIR`           | unset                         |
    /// | `CATALOG_API_KEY`      | required                      |
    /// | `CATALOG_API_KEY_FILE` | unset                         |
    /// | `CATALOG_BASE_URL`     | `https://wallhaven.cc/api/v1` |
    /// | `CATALOG_TIMEOUT_SECS` | `10`                          |
    /// | `CATALOG_MAX_RETRIES`  | `1`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&var, "PORT", 3000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30)?;
        let static_dir = var("STATIC_DIR").map(PathBuf::from);

        let api_key = match var("CATALOG_API_KEY") {
            Some(raw) => ApiKey::new(raw),
            None => match var("CATALOG_API_KEY_FILE") {
                Some(path) => {
                    let path = PathBuf::from(path);
                    let raw = std::fs::read_to_string(&path)
                        .map_err(|source| ConfigError::ApiKeyFile { path, source })?;
                    ApiKey::new(raw)
                }
                None => None,
            },
        }
        .ok_or(ConfigError::MissingApiKey)?;

        let base_url = var("CATALOG_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                key: "CATALOG_BASE_URL",
                value: base_url,
            });
        }

        let catalog = CatalogConfig {
            base_url,
            api_key,
            timeout_secs: parse_or(&var, "CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?,
            max_retries: parse_or(&var, "CATALOG_MAX_RETRIES", 1)?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            catalog,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
