use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("request rejected: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed story url: {0}")]
    MalformedUrl(String),
}
