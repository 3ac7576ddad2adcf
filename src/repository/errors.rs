use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Backend responded with status {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return match status {
                reqwest::StatusCode::NOT_FOUND => RepositoryError::NotFound,
                status => RepositoryError::Status(status.as_u16()),
            };
        }

        if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else if err.is_builder() {
            RepositoryError::InvalidRequest(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else {
            RepositoryError::Unexpected(format!("Unexpected backend error: {err}"))
        }
    }
}

