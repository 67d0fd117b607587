//! Comparison result cache.
//!
//! Results are cached as opaque JSON strings keyed by a deterministic
//! query fingerprint. The production backend is Redis with a TTL;
//! [`MemoryCache`] covers tests and single-process runs. Cache trouble
//! is never allowed to fail a comparison: the service treats read
//! errors as misses and ignores write errors.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use marketplaces::SearchQuery;
use redis::AsyncCommands;
use tokio::time::Instant;
use tracing::debug;

use crate::error::Result;

/// Cache key prefix for comparison results: compare:{fingerprint}
const COMPARE_KEY_PREFIX: &str = "compare:";

/// Default lifetime of a cached comparison.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Derives the deterministic cache key for a query.
///
/// Exactly the five fields that change the comparison result take
/// part; pagination never feeds the cached interactive path. Identical
/// field values always produce identical keys, any differing field a
/// different key.
pub fn fingerprint(query: &SearchQuery) -> String {
    format!(
        "{}{}|{}|{}|{}|{}",
        COMPARE_KEY_PREFIX,
        query.keyword,
        query.category,
        query.min_price,
        query.max_price,
        query.sort_by.as_str()
    )
}

/// Read/write access to cached comparison payloads.
///
/// Payloads are opaque strings; the service owns (de)serialization so
/// backends stay dumb.
#[async_trait]
pub trait ComparisonCache: Send + Sync {
    /// Looks up a payload, `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a payload that expires after `ttl`.
    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()>;
}

// ============================================================================
// Redis backend
// ============================================================================

/// Redis-backed comparison cache.
#[derive(Clone)]
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    /// Create a new Redis cache.
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Get an async connection.
    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }
}

#[async_trait]
impl ComparisonCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let payload: Option<String> = conn.get(key).await?;
        Ok(payload)
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.get_connection().await?;
        // Redis rejects a zero expiry.
        let ttl_secs = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, payload, ttl_secs).await?;
        debug!("Cached '{}' for {}s", key, ttl_secs);
        Ok(())
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// In-memory comparison cache with per-entry expiry.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComparisonCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.write().unwrap();
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((payload, _)) => Ok(Some(payload.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), (payload.to_string(), Instant::now() + ttl));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use marketplaces::SortBy;

    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = SearchQuery::new("lego").with_category("Toys");
        let b = SearchQuery::new("lego").with_category("Toys");
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_defaults_match_explicit_defaults() {
        let implicit = SearchQuery::new("lego");
        let explicit = SearchQuery::new("lego")
            .with_category("All")
            .with_price_range(0.0, 10_000.0)
            .with_sort(SortBy::Relevance);
        assert_eq!(fingerprint(&implicit), fingerprint(&explicit));
    }

    #[test]
    fn test_fingerprint_distinguishes_every_field() {
        let base = SearchQuery::new("lego");
        let variants = [
            SearchQuery::new("lego star wars"),
            SearchQuery::new("lego").with_category("Toys"),
            SearchQuery::new("lego").with_price_range(10.0, 10_000.0),
            SearchQuery::new("lego").with_price_range(0.0, 500.0),
            SearchQuery::new("lego").with_sort(SortBy::PriceAsc),
        ];

        for variant in &variants {
            assert_ne!(fingerprint(&base), fingerprint(variant));
        }
    }

    #[test]
    fn test_fingerprint_ignores_pagination() {
        let base = SearchQuery::new("lego");
        let paged = SearchQuery::new("lego").with_page(3).with_page_size(50);
        assert_eq!(fingerprint(&base), fingerprint(&paged));
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new();
        cache
            .set("compare:k", "[1,2,3]", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            cache.get("compare:k").await.unwrap(),
            Some("[1,2,3]".to_string())
        );
        assert_eq!(cache.get("compare:other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_overwrite() {
        let cache = MemoryCache::new();
        cache.set("k", "old", Duration::from_secs(60)).await.unwrap();
        cache.set("k", "new", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_expires() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(60)).await.unwrap();

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }
}
