//! Comparison pipeline orchestration.

use std::sync::Arc;
use std::time::Duration;

use aggregator::{aggregate, ComparisonGroup};
use futures::future::join_all;
use marketplaces::{SearchProvider, SearchQuery};
use metrics::{counter, histogram};
use normalizer::{Product, ProductAdapter};
use tracing::{debug, warn};

use crate::cache::{fingerprint, ComparisonCache, DEFAULT_CACHE_TTL_SECS};
use crate::error::{Error, Result};

/// Default per-provider deadline for the fan-out search.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;

/// One marketplace wired into the pipeline: the search client plus the
/// adapter that understands its records.
#[derive(Clone)]
pub struct MarketplaceHandle {
    pub provider: Arc<dyn SearchProvider>,
    pub adapter: Arc<dyn ProductAdapter>,
}

impl MarketplaceHandle {
    pub fn new(provider: Arc<dyn SearchProvider>, adapter: Arc<dyn ProductAdapter>) -> Self {
        Self { provider, adapter }
    }

    pub fn marketplace(&self) -> &'static str {
        self.provider.marketplace()
    }
}

/// Tunables for the comparison pipeline.
#[derive(Debug, Clone)]
pub struct ComparisonServiceConfig {
    /// Lifetime of cached comparison results.
    pub cache_ttl: Duration,
    /// Deadline applied to each provider search individually.
    pub provider_timeout: Duration,
}

impl Default for ComparisonServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

/// Orchestrates one comparison request end to end.
pub struct ComparisonService {
    marketplaces: Vec<MarketplaceHandle>,
    cache: Arc<dyn ComparisonCache>,
    config: ComparisonServiceConfig,
}

impl ComparisonService {
    pub fn new(
        marketplaces: Vec<MarketplaceHandle>,
        cache: Arc<dyn ComparisonCache>,
        config: ComparisonServiceConfig,
    ) -> Self {
        Self {
            marketplaces,
            cache,
            config,
        }
    }

    /// Runs one comparison: cache read-through, concurrent provider
    /// fan-out, normalization, grouping, cache write-back.
    ///
    /// Provider failures and timeouts cost their own records, never the
    /// request; even all providers failing still yields an empty result
    /// set. Cache trouble reads as a miss and is ignored on write.
    pub async fn compare(&self, query: &SearchQuery) -> Result<Vec<ComparisonGroup>> {
        if !query.has_keyword() {
            return Err(Error::EmptyKeyword);
        }

        counter!("comparison_requests_total").increment(1);
        let key = fingerprint(query);

        if let Some(groups) = self.cached(&key).await {
            counter!("comparison_cache_hits_total").increment(1);
            debug!("Cache hit for '{}'", key);
            return Ok(groups);
        }
        counter!("comparison_cache_misses_total").increment(1);

        let started = std::time::Instant::now();
        let products = self.fetch_normalized(query).await;
        let groups = aggregate(products);
        self.store(&key, &groups).await?;

        histogram!("comparison_compute_duration_seconds").record(started.elapsed().as_secs_f64());
        Ok(groups)
    }

    /// Fans out to every marketplace at once and settles all outcomes.
    ///
    /// Products concatenate in marketplace declaration order no matter
    /// which provider answered first.
    async fn fetch_normalized(&self, query: &SearchQuery) -> Vec<Product> {
        let searches = self.marketplaces.iter().map(|handle| async move {
            tokio::time::timeout(self.config.provider_timeout, handle.provider.search(query)).await
        });
        let outcomes = join_all(searches).await;

        let mut products = Vec::new();
        for (handle, outcome) in self.marketplaces.iter().zip(outcomes) {
            match outcome {
                Ok(Ok(raws)) => {
                    debug!("[{}] {} raw records", handle.marketplace(), raws.len());
                    products.extend(handle.adapter.normalize_all(&raws));
                }
                Ok(Err(e)) => {
                    warn!("[{}] search failed: {}", handle.marketplace(), e);
                    counter!("comparison_provider_failures_total", "marketplace" => handle.marketplace())
                        .increment(1);
                }
                Err(_) => {
                    warn!(
                        "[{}] search timed out after {:?}",
                        handle.marketplace(),
                        self.config.provider_timeout
                    );
                    counter!("comparison_provider_timeouts_total", "marketplace" => handle.marketplace())
                        .increment(1);
                }
            }
        }
        products
    }

    /// Reads a cached result, folding every failure mode into a miss.
    async fn cached(&self, key: &str) -> Option<Vec<ComparisonGroup>> {
        match self.cache.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(groups) => Some(groups),
                Err(e) => {
                    warn!("Discarding undecodable cache entry '{}': {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for '{}', treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Writes a computed result back, tolerating cache failures.
    async fn store(&self, key: &str, groups: &[ComparisonGroup]) -> Result<()> {
        let payload = serde_json::to_string(groups)?;
        if let Err(e) = self.cache.set(key, &payload, self.config.cache_ttl).await {
            warn!("Cache write failed for '{}', continuing: {}", key, e);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
