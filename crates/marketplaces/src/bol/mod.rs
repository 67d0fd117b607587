//! Bol.com catalog search integration.

pub mod client;

pub use client::BolClient;

/// Marketplace name stamped on everything Bol-sourced.
pub const MARKETPLACE: &str = "bol";
