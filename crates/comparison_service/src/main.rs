//! Comparison service entry point.
//!
//! Wires the marketplace clients, the Redis cache and the HTTP API,
//! then serves comparisons until shutdown. Optionally keeps a set of
//! popular keywords warm in the cache with a background refresh task.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comparison_service::{
    create_router, AppState, ComparisonService, ComparisonServiceConfig, MarketplaceHandle,
    RedisCache,
};
use marketplaces::{AmazonClient, BolClient, SearchQuery};
use metrics_exporter_prometheus::PrometheusBuilder;
use normalizer::{AmazonAdapter, BolAdapter};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run every configured warm keyword through the pipeline so popular
/// queries stay cached.
async fn warm_keywords(service: &ComparisonService, keywords: &[String]) {
    let mut success_count = 0;
    let mut error_count = 0;

    for keyword in keywords {
        match service.compare(&SearchQuery::new(keyword.clone())).await {
            Ok(groups) => {
                info!("Warmed '{}' ({} groups)", keyword, groups.len());
                success_count += 1;
            }
            Err(e) => {
                warn!("Failed to warm '{}': {:?}", keyword, e);
                error_count += 1;
            }
        }
    }

    info!(
        "Warm pass complete: {} ok, {} errors",
        success_count, error_count
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting comparison service...");

    // Initialize Prometheus metrics
    let metrics_port: u16 = std::env::var("METRICS_PORT")
        .unwrap_or_else(|_| "9090".into())
        .parse()
        .unwrap_or(9090);

    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], metrics_port))
        .install()?;

    info!(
        "Prometheus metrics available at http://0.0.0.0:{}/metrics",
        metrics_port
    );

    // Configuration from environment
    let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into());
    let http_port: u16 = std::env::var("HTTP_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()
        .unwrap_or(8080);
    let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
        .unwrap_or_else(|_| "3600".into())
        .parse()
        .unwrap_or(3600);
    let provider_timeout_secs: u64 = std::env::var("PROVIDER_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".into())
        .parse()
        .unwrap_or(5);

    // Marketplace clients
    let amazon_access_key = std::env::var("AMAZON_ACCESS_KEY").unwrap_or_default();
    let amazon_partner_tag = std::env::var("AMAZON_PARTNER_TAG").unwrap_or_default();
    if amazon_access_key.is_empty() {
        warn!("AMAZON_ACCESS_KEY not set, Amazon searches will be rejected upstream");
    }
    let amazon = match std::env::var("AMAZON_API_URL") {
        Ok(url) => AmazonClient::with_base_url(url, amazon_access_key, amazon_partner_tag),
        Err(_) => AmazonClient::new(amazon_access_key, amazon_partner_tag),
    };

    let bol_api_key = std::env::var("BOL_API_KEY").unwrap_or_default();
    if bol_api_key.is_empty() {
        warn!("BOL_API_KEY not set, Bol searches will be rejected upstream");
    }
    let bol = match std::env::var("BOL_API_URL") {
        Ok(url) => BolClient::with_base_url(url, bol_api_key),
        Err(_) => BolClient::new(bol_api_key),
    };

    let handles = vec![
        MarketplaceHandle::new(Arc::new(amazon), Arc::new(AmazonAdapter)),
        MarketplaceHandle::new(Arc::new(bol), Arc::new(BolAdapter)),
    ];
    info!(
        "Comparing across {} marketplaces: {}",
        handles.len(),
        handles
            .iter()
            .map(|h| h.marketplace())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Connect to Redis
    info!("Using Redis cache at {}", redis_url);
    let cache = RedisCache::new(&redis_url)?;

    let config = ComparisonServiceConfig {
        cache_ttl: Duration::from_secs(cache_ttl_secs),
        provider_timeout: Duration::from_secs(provider_timeout_secs),
    };
    let service = Arc::new(ComparisonService::new(handles, Arc::new(cache), config));

    // Spawn warm-keeping task
    let warm_list: Vec<String> = std::env::var("WARM_KEYWORDS")
        .unwrap_or_default()
        .split(',')
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    if !warm_list.is_empty() {
        let warm_interval_secs: u64 = std::env::var("WARM_INTERVAL_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .unwrap_or(600);
        let warm_service = service.clone();
        let interval = Duration::from_secs(warm_interval_secs);

        tokio::spawn(async move {
            info!(
                "Warm-keeping task started for {} keywords (interval: {}s)",
                warm_list.len(),
                warm_interval_secs
            );
            warm_keywords(&warm_service, &warm_list).await;
            loop {
                tokio::time::sleep(interval).await;
                warm_keywords(&warm_service, &warm_list).await;
            }
        });
    }

    // Create HTTP server
    let app_state = AppState { service };
    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", http_port)).await?;
    info!("HTTP API listening on http://0.0.0.0:{}", http_port);
    info!("Available endpoints:");
    info!("  GET /health   - Health check");
    info!("  GET /compare  - Compare a keyword across marketplaces");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Comparison service stopped");
    Ok(())
}

/// Completes when Ctrl+C arrives.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {:?}", e);
        return;
    }
    info!("Received shutdown signal");
}
