//! Comparison group model.

use normalizer::Product;
use serde::{Deserialize, Serialize};

/// Derives the grouping key for a product title.
///
/// Matching is exact after trimming and lowercasing; two offers belong
/// to the same group only when their titles agree character for
/// character beyond that.
pub fn group_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// One product compared across marketplaces.
///
/// `cheapest` and `most_expensive` are copies of offers from `offers`;
/// for a single-offer group they are the same offer. Ties go to the
/// earliest offer, so re-running the same input never flips the
/// winners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonGroup {
    /// Normalized title shared by every offer in the group.
    pub name: String,
    pub cheapest: Product,
    pub most_expensive: Product,
    pub offer_count: usize,
    pub offers: Vec<Product>,
}

// ============================================================================
// Tests
// ============================================================================
