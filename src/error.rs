// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Http(_) | Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Validation(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
