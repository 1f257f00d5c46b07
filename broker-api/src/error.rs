use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("HTTP error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, BrokerError>;
