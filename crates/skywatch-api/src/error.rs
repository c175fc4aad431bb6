use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the remote collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned error status: {status}")]
    Status { status: StatusCode },

    #[error("country not found: {0}")]
    CountryNotFound(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
