//! Amazon product search integration.

pub mod client;

pub use client::AmazonClient;

/// Marketplace name stamped on everything Amazon-sourced.
pub const MARKETPLACE: &str = "amazon";
