//! Adapter abstraction for provider-specific normalization.

use marketplaces::RawProduct;
use metrics::counter;
use tracing::debug;

use crate::schema::Product;

/// Translates one marketplace's raw records into [`Product`]s.
///
/// Adapters are pure: they read a raw JSON record and either produce a
/// normalized product or reject it. Rejection is reserved for records
/// without a usable title; every other defect is absorbed field by
/// field (missing price becomes `0.0`, missing URLs become empty).
pub trait ProductAdapter: Send + Sync {
    /// Marketplace this adapter understands; matches the paired
    /// provider's name.
    fn marketplace(&self) -> &'static str;

    /// Normalizes a single raw record, `None` when it is unusable.
    fn normalize(&self, raw: &RawProduct) -> Option<Product>;

    /// Normalizes a batch, dropping unusable records.
    ///
    /// Output order follows input order; downstream grouping relies on
    /// that.
    fn normalize_all(&self, raws: &[RawProduct]) -> Vec<Product> {
        let mut products = Vec::with_capacity(raws.len());
        let mut skipped = 0usize;

        for raw in raws {
            match self.normalize(raw) {
                Some(product) => products.push(product),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(
                "[{}] skipped {} untitled records",
                self.marketplace(),
                skipped
            );
            counter!("normalizer_skipped_total", "marketplace" => self.marketplace())
                .increment(skipped as u64);
        }
        products
    }
}

// ============================================================================
// Tests
// ============================================================================
