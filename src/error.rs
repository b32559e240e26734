//! Unified SDK error types.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API key cannot be used as a header value")]
    InvalidApiKey,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Caller mistakes caught before any network activity.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("format {0:?} is not one of the allowed export formats")]
    InvalidExportFormat(String),

    #[error("category {0:?} was not found in this team's list of categories")]
    UnknownCategory(String),

    #[error("{} already exists; pass overwrite to replace it", .0.display())]
    OutputExists(PathBuf),
}

/// Missing or unusable client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("client builder is missing {0}")]
    MissingField(&'static str),
}
