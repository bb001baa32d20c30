use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// The incoming request was rejected before any detection ran
    /// (missing profile id, empty query).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A data-store call failed or the requested records do not exist.
    /// Responders recover from this locally; it never fails a request.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// The retrieval service errored. Augmentation context is simply
    /// omitted when this occurs.
    #[error("Retrieval failure: {0}")]
    RetrievalFailure(String),

    /// The generation service call failed. Fatal for the responder call
    /// that issued it.
    #[error("Generation failure: {0}")]
    GenerationFailure(String),

    /// Required collaborator configuration is missing or invalid at
    /// startup. Never raised per-request.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DataUnavailable(format!("database error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::GenerationFailure(format!("HTTP error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::GenerationFailure(format!("response decode error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Configuration(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Configuration(format!("validation errors: {}", err))
    }
}
