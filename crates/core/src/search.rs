//! Search filters shared by the proxy endpoint and the client.
//!
//! The catalog service treats an empty parameter differently from an absent
//! one, so every optional filter here collapses empty strings to `None` and
//! is only ever serialized when it carries a value.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Fixed policy
// ---------------------------------------------------------------------------

/// Page requested when the caller does not name one.
pub const DEFAULT_PAGE: u32 = 1;

/// Category mask used when the caller omits categories (general, anime, people).
pub const DEFAULT_CATEGORIES: &str = "111";

/// Content-safety level sent upstream on every search. Safe content only.
pub const SAFE_PURITY: &str = "100";

/// Number of flags in a category mask.
pub const CATEGORY_MASK_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Optional search filters accepted by `GET /api/wallpapers`.
///
/// Deserializes straight from an inbound query-string. Unknown keys (such as a
/// client-supplied `apikey` or `purity`) are dropped by serde and can never
/// reach the upstream request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchFilters {
    #[serde(default, deserialize_with = "page_or_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "non_empty")]
    pub seed: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub resolutions: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub categories: Option<String>,
}

impl SearchFilters {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = present(seed.into());
        self
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = present(q.into());
        self
    }

    pub fn with_resolutions(mut self, resolutions: impl Into<String>) -> Self {
        self.resolutions = present(resolutions.into());
        self
    }

    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = present(categories.into());
        self
    }

    /// The requested page, falling back to [`DEFAULT_PAGE`].
    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// The caller's category mask, falling back to [`DEFAULT_CATEGORIES`].
    pub fn categories_or_default(&self) -> &str {
        self.categories.as_deref().unwrap_or(DEFAULT_CATEGORIES)
    }

    /// Check the filters before any upstream call is made.
    ///
    /// - `page` must be at least 1.
    /// - `categories` must be exactly three `0`/`1` flags.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page == Some(0) {
            return Err(CoreError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }

        if let Some(mask) = &self.categories {
            if !is_valid_category_mask(mask) {
                return Err(CoreError::Validation(format!(
                    "categories must be {CATEGORY_MASK_LEN} characters of 0 or 1, got '{mask}'"
                )));
            }
        }

        Ok(())
    }

    /// Seed, free-text query and resolution filter, in wire order, skipping
    /// the ones that are absent.
    pub fn optional_pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("seed", self.seed.as_deref()),
            ("q", self.q.as_deref()),
            ("resolutions", self.resolutions.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }

    /// Query-string pairs sent from a client to the proxy endpoint.
    ///
    /// `page` is always present; everything else only when set. No defaults
    /// are filled in here, the proxy owns those.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page_or_default().to_string())];
        pairs.extend(self.optional_pairs().map(|(k, v)| (k, v.to_string())));
        if let Some(categories) = &self.categories {
            pairs.push(("categories", categories.clone()));
        }
        pairs
    }
}

/// Check whether `mask` is a well-formed category mask such as `"101"`.
pub fn is_valid_category_mask(mask: &str) -> bool {
    mask.len() == CATEGORY_MASK_LEN && mask.bytes().all(|b| b == b'0' || b == b'1')
}

fn present(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(present))
}

fn page_or_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.and_then(present) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<u32>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("page must be a positive integer, got '{raw}'"))
        }),
    }
}
