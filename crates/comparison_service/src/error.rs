//! Error types for the comparison service.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("keyword is required")]
    EmptyKeyword,

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
