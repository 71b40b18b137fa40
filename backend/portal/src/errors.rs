//! Application-wide error types.

use sumcharity_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("ABI decode error: {0}")]
    Abi(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Please connect your wallet to {0}")]
    WalletNotConnected(&'static str),

    #[error("Action not available: {0}")]
    NotEligible(&'static str),

    #[error("Project {0} not found")]
    ProjectNotFound(u64),
}

pub type Result<T> = std::result::Result<T, PortalError>;
