use thiserror::Error;

/// Errors raised by the tour client. None of them is fatal to the page:
/// each one degrades a single feature.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("listing not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("a registration is already in flight")]
    SubmissionInFlight,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("share sheet failed: {0}")]
    Share(String),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, TourError>;
