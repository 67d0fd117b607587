//! End-to-end pipeline tests against stub marketplace servers.
//!
//! Spins up throwaway axum servers that answer like Amazon and Bol,
//! points real clients at them and drives the full pipeline, including
//! once through the public HTTP API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use comparison_service::{
    create_router, AppState, ComparisonService, ComparisonServiceConfig, MarketplaceHandle,
    MemoryCache,
};
use marketplaces::{AmazonClient, BolClient, SearchQuery};
use normalizer::{AmazonAdapter, BolAdapter};
use serde_json::{json, Value};

/// Serves one canned JSON payload and counts hits.
struct StubMarketplace {
    payload: Value,
    hits: Arc<AtomicUsize>,
}

async fn stub_search(State(stub): State<Arc<StubMarketplace>>) -> Json<Value> {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    Json(stub.payload.clone())
}

async fn spawn_stub(payload: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let stub = Arc::new(StubMarketplace {
        payload,
        hits: hits.clone(),
    });
    let router = Router::new()
        .route("/search", get(stub_search))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn amazon_payload() -> Value {
    json!({
        "searchResult": {
            "items": [
                {
                    "asin": "B0FALCON",
                    "detailPageUrl": "https://www.amazon.de/dp/B0FALCON",
                    "itemInfo": {"title": {"displayValue": "LEGO Star Wars Millennium Falcon 75375"}},
                    "offers": {"listings": [{"price": {"amount": 159.99}}]}
                },
                {
                    "asin": "B0CITY",
                    "itemInfo": {"title": {"displayValue": "LEGO City Fire Truck"}},
                    "offers": {"listings": [{"price": {"displayAmount": "€34,99"}}]}
                },
                {"asin": "B0UNTITLED"}
            ],
            "totalResultCount": 3
        }
    })
}

fn bol_payload() -> Value {
    json!({
        "products": [
            {
                "id": 9200000123456i64,
                "title": "  lego star wars millennium falcon 75375 ",
                "offerData": {"offers": [{"price": "149,99"}]},
                "urls": [{"key": "DESKTOP", "value": "https://www.bol.com/nl/p/9200000123456"}]
            }
        ],
        "totalResultSize": 1
    })
}

async fn build_service() -> (Arc<ComparisonService>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let (amazon_url, amazon_hits) = spawn_stub(amazon_payload()).await;
    let (bol_url, bol_hits) = spawn_stub(bol_payload()).await;

    let handles = vec![
        MarketplaceHandle::new(
            Arc::new(AmazonClient::with_base_url(amazon_url, "test-key", "test-tag")),
            Arc::new(AmazonAdapter),
        ),
        MarketplaceHandle::new(
            Arc::new(BolClient::with_base_url(bol_url, "test-key")),
            Arc::new(BolAdapter),
        ),
    ];
    let service = Arc::new(ComparisonService::new(
        handles,
        Arc::new(MemoryCache::new()),
        ComparisonServiceConfig::default(),
    ));

    (service, amazon_hits, bol_hits)
}

#[tokio::test]
async fn test_compare_end_to_end() {
    let (service, _, _) = build_service().await;

    let groups = service.compare(&SearchQuery::new("lego")).await.unwrap();

    // Untitled Amazon record dropped; the Falcon merges across markets.
    assert_eq!(groups.len(), 2);

    let falcon = &groups[0];
    assert_eq!(falcon.name, "lego star wars millennium falcon 75375");
    assert_eq!(falcon.offer_count, 2);
    assert_eq!(falcon.cheapest.marketplace, "bol");
    assert_eq!(falcon.cheapest.price, 149.99);
    assert_eq!(falcon.most_expensive.marketplace, "amazon");
    assert_eq!(falcon.most_expensive.price, 159.99);

    let city = &groups[1];
    assert_eq!(city.name, "lego city fire truck");
    assert_eq!(city.offer_count, 1);
    assert_eq!(city.cheapest.price, 34.99);
}

#[tokio::test]
async fn test_repeat_queries_hit_cache() {
    let (service, amazon_hits, bol_hits) = build_service().await;
    let query = SearchQuery::new("lego");

    let first = service.compare(&query).await.unwrap();
    let second = service.compare(&query).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(amazon_hits.load(Ordering::SeqCst), 1);
    assert_eq!(bol_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_provider_outage_degrades_to_partial_results() {
    let (amazon_url, _) = spawn_stub(amazon_payload()).await;

    let handles = vec![
        MarketplaceHandle::new(
            Arc::new(AmazonClient::with_base_url(amazon_url, "test-key", "test-tag")),
            Arc::new(AmazonAdapter),
        ),
        // Nothing listens here, so the Bol search fails outright.
        MarketplaceHandle::new(
            Arc::new(BolClient::with_base_url("http://127.0.0.1:1", "test-key")),
            Arc::new(BolAdapter),
        ),
    ];
    let service = ComparisonService::new(
        handles,
        Arc::new(MemoryCache::new()),
        ComparisonServiceConfig::default(),
    );

    let groups = service.compare(&SearchQuery::new("lego")).await.unwrap();

    assert_eq!(groups.len(), 2);
    for group in &groups {
        assert!(group.offers.iter().all(|o| o.marketplace == "amazon"));
    }
}

#[tokio::test]
async fn test_http_api_end_to_end() {
    let (service, _, _) = build_service().await;
    let router = create_router(AppState { service });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let base = format!("http://{}", addr);

    let health: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let response = reqwest::get(format!(
        "{}/compare?keyword=lego&minPrice=100&maxPrice=200&sortBy=PRICE_ASC",
        base
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);

    let groups: Value = response.json().await.unwrap();
    let falcon = &groups[0];
    assert_eq!(falcon["name"], "lego star wars millennium falcon 75375");
    assert_eq!(falcon["offerCount"], 2);
    assert_eq!(falcon["cheapest"]["marketplace"], "bol");
    assert_eq!(falcon["mostExpensive"]["marketplace"], "amazon");

    let missing_keyword = reqwest::get(format!("{}/compare", base)).await.unwrap();
    assert_eq!(missing_keyword.status(), 400);
    let body: Value = missing_keyword.json().await.unwrap();
    assert_eq!(body["error"], "keyword is required");
}
