//! Search client for the Bol.com catalog API.

use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::provider::{RawProduct, SearchProvider};
use crate::query::{SearchQuery, SortBy};

use super::MARKETPLACE;

const BOL_API_BASE: &str = "https://api.bol.com/catalog/v4";

/// Client for the Bol.com catalog search API.
///
/// Bol authenticates with a plain API key passed as a query parameter.
pub struct BolClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BolClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(BOL_API_BASE, api_key)
    }

    /// Creates a client against a non-default endpoint, e.g. a stub
    /// server in tests.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.keyword.trim().to_string()),
            // Bol takes the price window as a single "min-max" range.
            ("price", format!("{}-{}", query.min_price, query.max_price)),
            ("sort", sort_value(query.sort_by).to_string()),
            ("apikey", self.api_key.clone()),
        ];
        if !query.is_all_categories() {
            params.push(("category", query.category.trim().to_string()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("limit", page_size.to_string()));
        }
        params
    }
}

#[async_trait]
impl SearchProvider for BolClient {
    fn marketplace(&self) -> &'static str {
        MARKETPLACE
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawProduct>> {
        if !query.has_keyword() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        debug!("Searching Bol at: {}", url);
        counter!("marketplace_requests_total", "marketplace" => MARKETPLACE).increment(1);

        let response = self
            .client
            .get(&url)
            .query(&self.search_params(query))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "Bol search returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let products = parse_products(&body)?;
        debug!("Bol returned {} raw products", products.len());
        Ok(products)
    }
}

fn sort_value(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Relevance => "relevance",
        SortBy::PriceAsc => "price_asc",
        SortBy::PriceDesc => "price_desc",
        SortBy::Rating => "rating",
    }
}

/// Pulls the raw product array out of a search response body.
///
/// Bol returns a flat `products` array that is absent when nothing
/// matched.
fn parse_products(body: &str) -> Result<Vec<RawProduct>> {
    #[derive(Deserialize)]
    struct SearchResponse {
        #[serde(default)]
        products: Vec<RawProduct>,
    }

    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.products)
}

// ============================================================================
// Tests
// ============================================================================
