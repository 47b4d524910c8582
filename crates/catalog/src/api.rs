//! HTTP client for the catalog search endpoint.
//!
//! Wraps `GET {base}/search` using [`reqwest`]. Successful bodies are handed
//! back as raw bytes so the proxy can relay them without reshaping.

use std::time::Duration;

use wallbrowse_core::search::{SearchFilters, SAFE_PURITY};

use crate::credential::ApiKey;

/// Public catalog API root.
pub const DEFAULT_BASE_URL: &str = "https://wallhaven.cc/api/v1";

/// Upper bound for a single upstream search call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause before retrying a connection that could not be established.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Errors from the catalog client.
///
/// Transport errors are stored without their URL, because the URL carries
/// the credential in its query-string.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog answered with a non-2xx status code.
    #[error("Catalog returned HTTP {0}")]
    Status(u16),

    /// No response was received (DNS, connect, TLS, body read).
    #[error("Catalog request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The catalog did not answer within the configured timeout.
    #[error("Catalog request timed out")]
    Timeout,

    /// The catalog answered 2xx with a body that is not JSON.
    #[error("Catalog returned a malformed body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else {
            CatalogError::Transport(err.without_url())
        }
    }
}

/// HTTP client for the catalog service.
///
/// Cheap to share behind an `Arc`; the inner [`reqwest::Client`] pools
/// connections.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    max_retries: u32,
}

impl CatalogClient {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`].
    /// * `timeout` - bound on each upstream call.
    /// * `max_retries` - extra attempts when the connection cannot be made.
    pub fn new(
        base_url: impl Into<String>,
        api_key: ApiKey,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key).max_retries(max_retries))
    }

    /// Create a client reusing an existing [`reqwest::Client`]. No retries.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, api_key: ApiKey) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key,
            max_retries: 0,
        }
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Run one search against the catalog and return the JSON body verbatim.
    ///
    /// The body is checked to be well-formed JSON but is otherwise untouched.
    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<u8>, CatalogError> {
        let query = search_query(&self.api_key, filters);
        let url = format!("{}/search", self.base_url);

        tracing::debug!(
            page = filters.page_or_default(),
            categories = filters.categories_or_default(),
            seeded = filters.seed.is_some(),
            has_query = filters.q.is_some(),
            resolutions = ?filters.resolutions,
            "Searching catalog"
        );

        let response = self.send_with_retry(&url, &query).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Catalog search returned an error status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?.to_vec();
        serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;

        Ok(body)
    }

    // ---- private helpers ----

    /// Send the request, retrying only when no connection could be made.
    async fn send_with_retry(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<reqwest::Response, CatalogError> {
        let mut attempt = 0;
        loop {
            match self.client.get(url).query(query).send().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() && !e.is_timeout() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        error = %e.without_url(),
                        "Catalog connection failed, retrying"
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Build the upstream query-string.
///
/// Order: credential, page, purity, categories, then seed, free-text query and
/// resolution filter when present.
pub fn search_query(api_key: &ApiKey, filters: &SearchFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("apikey", api_key.expose().to_string()),
        ("page", filters.page_or_default().to_string()),
        ("purity", SAFE_PURITY.to_string()),
        ("categories", filters.categories_or_default().to_string()),
    ];
    query.extend(
        filters
            .optional_pairs()
            .map(|(key, value)| (key, value.to_string())),
    );
    query
}
