//! Normalization of raw marketplace records into the canonical schema.
//!
//! Each marketplace pairs a `SearchProvider` (in the `marketplaces`
//! crate) with a [`ProductAdapter`] here. Providers return loose JSON;
//! adapters turn it into [`Product`]s with coerced prices, dropping
//! records that lack a usable title.

pub mod amazon;
pub mod bol;
pub mod price;
pub mod schema;
pub mod traits;

mod value;

pub use amazon::AmazonAdapter;
pub use bol::BolAdapter;
pub use price::coerce_price;
pub use schema::Product;
pub use traits::ProductAdapter;
