use thiserror::Error;

/// Errors returned by the album client.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP request could not be sent or its body not read.
    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A reply did not have the expected JSON shape.
    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    /// A caller-supplied argument was rejected before any request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Base URL, timeout or environment could not be used.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
