//! Grouping and extrema selection.

use indexmap::IndexMap;
use normalizer::Product;
use tracing::debug;

use crate::group::{group_key, ComparisonGroup};

/// Folds normalized products into comparison groups.
///
/// Products with equal [`group_key`]s land in one group. Groups come
/// back in first-appearance order and offers inside a group keep their
/// input order, so identical input always produces identical output.
/// Empty input yields no groups.
pub fn aggregate(products: Vec<Product>) -> Vec<ComparisonGroup> {
    let mut buckets: IndexMap<String, Vec<Product>> = IndexMap::new();
    for product in products {
        buckets
            .entry(group_key(&product.title))
            .or_default()
            .push(product);
    }

    debug!("aggregated products into {} groups", buckets.len());
    buckets
        .into_iter()
        .map(|(name, offers)| build_group(name, offers))
        .collect()
}

/// Builds one group from its offers, which are never empty here.
///
/// Extrema use strict comparison, so the first offer at a given price
/// wins over later offers at the same price.
fn build_group(name: String, offers: Vec<Product>) -> ComparisonGroup {
    let mut cheapest = &offers[0];
    let mut most_expensive = &offers[0];

    for offer in &offers[1..] {
        if offer.price < cheapest.price {
            cheapest = offer;
        }
        if offer.price > most_expensive.price {
            most_expensive = offer;
        }
    }

    ComparisonGroup {
        name,
        cheapest: cheapest.clone(),
        most_expensive: most_expensive.clone(),
        offer_count: offers.len(),
        offers,
    }
}

// ============================================================================
// Tests
// ============================================================================
