//! Use cases behind the HTTP routes, generic over the repository traits.

use thiserror::Error;

use crate::forms::FormError;
use crate::listing::selection::SelectionError;
use crate::repository::errors::RepositoryError;

pub mod equipment;
pub mod listing;
pub mod movements;
pub mod order_services;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Selection(#[from] SelectionError),

    #[error("record not found")]
    NotFound,
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            err => ServiceError::Repository(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_not_found_becomes_service_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::Status(502)),
            ServiceError::Repository(RepositoryError::Status(502))
        ));
    }
}
