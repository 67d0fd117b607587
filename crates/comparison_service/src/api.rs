//! HTTP API handlers and routes using axum.
//!
//! Routes:
//! - GET /health - Health check
//! - GET /compare - Compare a keyword across all marketplaces

use std::sync::Arc;

use aggregator::ComparisonGroup;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use marketplaces::query::{DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use marketplaces::{SearchQuery, SortBy};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::error::Error;
use crate::service::ComparisonService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ComparisonService>,
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/compare", get(compare_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for `GET /compare`.
///
/// The numeric filters arrive as strings ("0", "10000") to match the
/// public contract; anything unparseable falls back to its default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareParams {
    #[serde(default)]
    pub keyword: String,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
}

impl CompareParams {
    /// Converts raw wire parameters into a search query, applying the
    /// documented default for everything omitted or unreadable.
    fn into_query(self) -> SearchQuery {
        let mut query = SearchQuery::new(self.keyword);
        if let Some(category) = self.category {
            query.category = category;
        }
        if let Some(min_price) = self.min_price {
            query.min_price = min_price.trim().parse().unwrap_or(DEFAULT_MIN_PRICE);
        }
        if let Some(max_price) = self.max_price {
            query.max_price = max_price.trim().parse().unwrap_or(DEFAULT_MAX_PRICE);
        }
        if let Some(sort_by) = self.sort_by {
            query.sort_by = SortBy::parse(&sort_by);
        }
        query
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
/// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Compare one keyword across all marketplaces.
/// GET /compare?keyword=...&category=...&minPrice=...&maxPrice=...&sortBy=...
async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Vec<ComparisonGroup>>, (StatusCode, Json<ErrorResponse>)> {
    let query = params.into_query();
    match state.service.compare(&query).await {
        Ok(groups) => Ok(Json(groups)),
        Err(e @ Error::EmptyKeyword) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
        Err(e) => {
            error!("Comparison for '{}' failed: {:?}", query.keyword, e);
            // No internals leak to the caller.
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal server error".to_string(),
                }),
            ))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
