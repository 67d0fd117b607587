//! Search client for the Amazon product API.

use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::provider::{RawProduct, SearchProvider};
use crate::query::{SearchQuery, SortBy};

use super::MARKETPLACE;

const AMAZON_API_BASE: &str = "https://api.affiliate.amazon.com/v5";
const ACCESS_KEY_HEADER: &str = "x-amz-access-key";

/// Client for the Amazon product search API.
///
/// Authentication follows the affiliate model: an access key travels in
/// a request header and a partner tag rides along as a query parameter
/// so result links carry the referral.
pub struct AmazonClient {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
    partner_tag: String,
}

impl AmazonClient {
    pub fn new(access_key: impl Into<String>, partner_tag: impl Into<String>) -> Self {
        Self::with_base_url(AMAZON_API_BASE, access_key, partner_tag)
    }

    /// Creates a client against a non-default endpoint, e.g. a regional
    /// host or a stub server in tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        partner_tag: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            access_key: access_key.into(),
            partner_tag: partner_tag.into(),
        }
    }

    fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("keywords", query.keyword.trim().to_string()),
            ("minPrice", query.min_price.to_string()),
            ("maxPrice", query.max_price.to_string()),
            ("sortBy", sort_value(query.sort_by).to_string()),
            ("partnerTag", self.partner_tag.clone()),
        ];
        if !query.is_all_categories() {
            params.push(("searchIndex", query.category.trim().to_string()));
        }
        if let Some(page) = query.page {
            params.push(("itemPage", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("itemCount", page_size.to_string()));
        }
        params
    }
}

#[async_trait]
impl SearchProvider for AmazonClient {
    fn marketplace(&self) -> &'static str {
        MARKETPLACE
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawProduct>> {
        if !query.has_keyword() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        debug!("Searching Amazon at: {}", url);
        counter!("marketplace_requests_total", "marketplace" => MARKETPLACE).increment(1);

        let response = self
            .client
            .get(&url)
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .query(&self.search_params(query))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "Amazon search returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let items = parse_items(&body)?;
        debug!("Amazon returned {} raw products", items.len());
        Ok(items)
    }
}

fn sort_value(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Relevance => "Relevance",
        SortBy::PriceAsc => "Price:LowToHigh",
        SortBy::PriceDesc => "Price:HighToLow",
        SortBy::Rating => "AvgCustomerReviews",
    }
}

/// Pulls the raw item array out of a search response body.
///
/// Amazon wraps results in a `searchResult` envelope that is missing
/// entirely when nothing matched.
fn parse_items(body: &str) -> Result<Vec<RawProduct>> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SearchResponse {
        #[serde(default)]
        search_result: Option<SearchResult>,
    }

    #[derive(Deserialize)]
    struct SearchResult {
        #[serde(default)]
        items: Vec<RawProduct>,
    }

    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .search_result
        .map(|result| result.items)
        .unwrap_or_default())
}

// ============================================================================
// Tests
// ============================================================================
