//! Provider abstraction over marketplace search APIs.

use async_trait::async_trait;

use crate::error::Result;
use crate::query::SearchQuery;

/// A single result record exactly as the marketplace returned it.
///
/// Provider payloads disagree on shape and even field types, so records
/// stay loose JSON until the normalizer reads them.
pub type RawProduct = serde_json::Value;

/// A marketplace that can be searched for product offers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Stable marketplace name used in logs, metrics and normalized records.
    fn marketplace(&self) -> &'static str;

    /// Runs one search against the marketplace.
    ///
    /// A blank keyword must yield an empty list, not an error, so a
    /// misrouted query degrades to "no offers" instead of a failure.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawProduct>>;
}
