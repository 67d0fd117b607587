//! Canonical product schema.

use serde::{Deserialize, Serialize};

/// A marketplace offer normalized into the shared schema.
///
/// Whatever the provider payload looked like, downstream code only ever
/// sees this shape. Serialized field names are camelCase to match the
/// public API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Provider-scoped identifier (ASIN, Bol product id).
    pub id: String,
    /// Marketplace the offer came from.
    pub marketplace: String,
    pub title: String,
    /// Always finite and non-negative; `0.0` when the raw price was
    /// missing or unreadable.
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub product_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Bare product with just the identifying fields, optional fields
    /// empty. Handy for fixtures.
    pub fn new(
        id: impl Into<String>,
        marketplace: impl Into<String>,
        title: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            marketplace: marketplace.into(),
            title: title.into(),
            price,
            image_url: String::new(),
            product_url: String::new(),
            rating: None,
            review_count: None,
            category: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
