//! Cross-marketplace price comparison service.
//!
//! Wires the whole pipeline: marketplace providers fan out
//! concurrently, raw records get normalized, normalized products get
//! grouped, and the grouped result lands in Redis keyed by a query
//! fingerprint. An axum HTTP API exposes the pipeline at `GET /compare`.

pub mod api;
pub mod cache;
pub mod error;
pub mod service;

pub use api::{create_router, AppState};
pub use cache::{fingerprint, ComparisonCache, MemoryCache, RedisCache};
pub use error::{Error, Result};
pub use service::{ComparisonService, ComparisonServiceConfig, MarketplaceHandle};
