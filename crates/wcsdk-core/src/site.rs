use serde::{Deserialize, Serialize};

/// A single WooCommerce installation.
///
/// `id` is the local key every persisted record is scoped by; `url` is the
/// site's public root, e.g. `"https://shop.example.com"`. The REST API is
/// reached under `{url}/wp-json/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub url: String,
}

impl Site {
    #[must_use]
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }
}
