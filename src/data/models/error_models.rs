use thiserror::Error;
use validator::ValidationErrors;

// Failures talking to the dictionary/news endpoints
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Empty query")]
    EmptyQuery,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed with status {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Upstream(String),
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}

// Local persistence errors, never surfaced past StorageClient
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage quota exceeded ({needed} > {quota} bytes)")]
    QuotaExceeded { needed: usize, quota: usize },
}

// Input rejected before any request is made
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Query too short")]
    TooShort(String),
}

impl From<ValidationErrors> for ValidationError {
    fn from(err: ValidationErrors) -> Self {
        ValidationError::TooShort(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status(status.as_u16())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
