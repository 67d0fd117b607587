//! Bulk page fetching with retry.
//!
//! The interactive compare path asks each marketplace for a single page.
//! Catalog sync jobs instead walk result pages until the marketplace
//! runs out, retrying transient failures with exponential backoff.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::provider::{RawProduct, SearchProvider};
use crate::query::SearchQuery;

/// Backoff behaviour for a single page fetch.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

/// Fetches up to `max_pages` result pages from one marketplace.
///
/// Stops early when a page comes back empty. A page that still fails
/// after all retry attempts fails the whole walk, discarding pages
/// already collected.
pub async fn fetch_pages(
    provider: &dyn SearchProvider,
    query: &SearchQuery,
    max_pages: u32,
    retry: &RetryPolicy,
) -> Result<Vec<RawProduct>> {
    let mut records = Vec::new();

    for page in 1..=max_pages {
        let paged = query.clone().with_page(page);
        let batch = fetch_page_with_retry(provider, &paged, retry).await?;
        if batch.is_empty() {
            debug!("[{}] page {} empty, stopping", provider.marketplace(), page);
            break;
        }
        records.extend(batch);
    }

    debug!(
        "[{}] collected {} records",
        provider.marketplace(),
        records.len()
    );
    Ok(records)
}

async fn fetch_page_with_retry(
    provider: &dyn SearchProvider,
    query: &SearchQuery,
    retry: &RetryPolicy,
) -> Result<Vec<RawProduct>> {
    let mut delay = retry.initial_delay;
    let mut last_err = None;

    for attempt in 1..=retry.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(retry.max_delay);
        }
        match provider.search(query).await {
            Ok(batch) => return Ok(batch),
            Err(e) => {
                warn!(
                    "[{}] attempt {}/{} failed: {}",
                    provider.marketplace(),
                    attempt,
                    retry.max_attempts,
                    e
                );
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| Error::Api("retry attempts exhausted".to_string())))
}

// ============================================================================
// Tests
// ============================================================================
