//! Board-server-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Order API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("Order API returned a malformed payload: {message}")]
    ApiPayload { message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    pub fn config(message: impl Into<String>) -> Self {
        BoardError::Config(message.into())
    }

    pub fn payload(message: impl Into<String>) -> Self {
        BoardError::ApiPayload {
            message: message.into(),
        }
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
