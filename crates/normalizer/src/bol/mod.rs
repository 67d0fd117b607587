//! Bol.com record normalization.

pub mod adapter;

pub use adapter::BolAdapter;
