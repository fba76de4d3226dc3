//! Error types for the handheld library

use thiserror::Error;

/// Calculator failures. Both kinds surface as the same display token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("display does not hold a number")]
    Parse,

    #[error("argument outside the function's domain")]
    Domain,
}

/// Key-value store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Login flow failures
///
/// The lockout machine itself cannot fail; only the storage behind it can.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
