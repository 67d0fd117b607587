//! Amazon record normalization.

pub mod adapter;

pub use adapter::AmazonAdapter;
