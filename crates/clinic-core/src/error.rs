//! Error types for the fallible edges of the crate.
//!
//! The clinical operations themselves are total (issue lists, `Option`,
//! tagged fallbacks). Errors only arise when decoding wire records or
//! loading configuration.

use thiserror::Error;

/// Errors raised while decoding input or loading configuration.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClinicResult<T> = Result<T, ClinicError>;
