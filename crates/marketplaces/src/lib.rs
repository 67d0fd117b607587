//! Marketplace search clients.
//!
//! Every supported marketplace gets a thin HTTP client that speaks that
//! marketplace's own search API and hands back raw, provider-shaped JSON
//! records. Clients never interpret record fields; turning raw records
//! into the canonical product schema is the `normalizer` crate's job.
//!
//! All clients implement [`SearchProvider`], so the comparison pipeline
//! can fan out over a heterogeneous set of marketplaces.

pub mod amazon;
pub mod batch;
pub mod bol;
pub mod error;
pub mod provider;
pub mod query;

pub use amazon::AmazonClient;
pub use bol::BolClient;
pub use error::{Error, Result};
pub use provider::{RawProduct, SearchProvider};
pub use query::{SearchQuery, SortBy};
