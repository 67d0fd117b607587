//! Cross-marketplace comparison grouping.
//!
//! Takes the combined normalized products of all marketplaces and folds
//! them into [`ComparisonGroup`]s keyed by title, each carrying the
//! cheapest and most expensive offer. Grouping is order-preserving:
//! groups enumerate in the order their first offer appeared, so the
//! same input always yields the same output.

pub mod aggregate;
pub mod group;

pub use aggregate::aggregate;
pub use group::{group_key, ComparisonGroup};
