//! Search query model shared by every marketplace client.

use serde::{Deserialize, Serialize};

/// Category value meaning "no category filter".
pub const DEFAULT_CATEGORY: &str = "All";
/// Lower price bound applied when the caller gives none.
pub const DEFAULT_MIN_PRICE: f64 = 0.0;
/// Upper price bound applied when the caller gives none.
pub const DEFAULT_MAX_PRICE: f64 = 10_000.0;

/// Result ordering requested from a marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl SortBy {
    /// Canonical wire spelling, also used in cache fingerprints.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "RELEVANCE",
            SortBy::PriceAsc => "PRICE_ASC",
            SortBy::PriceDesc => "PRICE_DESC",
            SortBy::Rating => "RATING",
        }
    }

    /// Parses a sort directive, falling back to relevance for anything unknown.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PRICE_ASC" => SortBy::PriceAsc,
            "PRICE_DESC" => SortBy::PriceDesc,
            "RATING" => SortBy::Rating,
            _ => SortBy::Relevance,
        }
    }
}

/// Parameters of one comparison search.
///
/// [`SearchQuery::new`] fills every field besides the keyword with its
/// documented default, so a bare keyword query spans the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
    pub category: String,
    pub min_price: f64,
    pub max_price: f64,
    pub sort_by: SortBy,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: DEFAULT_CATEGORY.to_string(),
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            sort_by: SortBy::default(),
            page: None,
            page_size: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price_range(mut self, min_price: f64, max_price: f64) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// True when the keyword carries any non-whitespace characters.
    pub fn has_keyword(&self) -> bool {
        !self.keyword.trim().is_empty()
    }

    /// True when the category places no restriction on results.
    pub fn is_all_categories(&self) -> bool {
        let category = self.category.trim();
        category.is_empty() || category.eq_ignore_ascii_case("all")
    }
}

// ============================================================================
// Tests
// ============================================================================
