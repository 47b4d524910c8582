//! Typed view of a catalog search page.
//!
//! The proxy never builds these: it relays upstream bytes untouched. They
//! exist for the client side, which parses the relayed body.

use serde::{Deserialize, Deserializer, Serialize};

/// A single wallpaper record as returned by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallpaper {
    pub id: String,
    pub url: String,
    pub short_url: String,
    pub views: u64,
    pub favorites: u64,
    pub source: String,
    pub purity: String,
    pub category: String,
    pub dimension_x: u32,
    pub dimension_y: u32,
    pub resolution: String,
    pub ratio: String,
    pub file_size: u64,
    pub file_type: String,
    /// Upstream timestamp, kept as sent (`YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Direct link to the full-size image.
    pub path: String,
    pub thumbs: Thumbs,
}

/// Thumbnail URL variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbs {
    pub large: String,
    pub original: String,
    pub small: String,
}

/// Pagination metadata plus the query and seed the service used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub current_page: u32,
    pub last_page: u32,
    /// The service sends this as a number or a numeric string.
    #[serde(deserialize_with = "number_or_string")]
    pub per_page: u32,
    pub total: u64,
    /// A plain string for free-text searches, an object for tag searches.
    #[serde(default)]
    pub query: Option<serde_json::Value>,
    #[serde(default)]
    pub seed: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<Wallpaper>,
    pub meta: SearchMeta,
}

impl SearchPage {
    /// An empty page is a valid answer, not an error.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.meta.current_page < self.meta.last_page
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
