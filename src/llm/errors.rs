//! Error types for the completion gateway

use thiserror::Error;

/// Everything that can go wrong between "send this history" and "here is
/// the assistant's text". The submit path folds these into display text;
/// the variants stay distinct so a frontend can tell the kinds apart.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Malformed response: {0}")]
    ResponseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
