//! Typed client for the wallpaper search proxy.
//!
//! Builds the proxy query-string from [`SearchFilters`], calls
//! `GET {base}/api/wallpapers` and parses the relayed catalog page.

use std::time::Duration;

use wallbrowse_core::search::SearchFilters;
use wallbrowse_core::wallpaper::SearchPage;

/// Path of the proxy's search endpoint.
pub const SEARCH_PATH: &str = "/api/wallpapers";

/// Default bound on a single proxy call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced to callers of [`WallpaperClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The proxy answered with a non-2xx status code, plus the `error`
    /// message from its JSON body when one was readable.
    #[error("HTTP error! status: {status}{}", message_suffix(.message))]
    Fetch { status: u16, message: Option<String> },

    /// No response was received from the proxy.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The proxy answered 2xx with a body that is not a search page.
    #[error("Invalid search page: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether retrying the same request later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Fetch { status, .. } => *status == 429 || *status >= 500,
            ClientError::Decode(_) => false,
        }
    }
}

/// HTTP client for the search proxy.
pub struct WallpaperClient {
    client: reqwest::Client,
    base_url: String,
}

impl WallpaperClient {
    /// Create a client for the proxy at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of wallpapers.
    ///
    /// `page` is always sent (default 1); seed, query, resolutions and
    /// categories only when set. An empty page is returned as `Ok`.
    pub async fn fetch_wallpapers(&self, filters: &SearchFilters) -> Result<SearchPage, ClientError> {
        let url = format!("{}{SEARCH_PATH}", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&filters.query_pairs())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching wallpapers");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| error_message(&body));
            return Err(ClientError::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Error reading wallpaper response");
            ClientError::Network(e)
        })?;

        Ok(serde_json::from_slice(&body)?)
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

/// Error body shape the proxy sends with every non-2xx answer.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Best-effort read of the proxy's `error` message.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
}
