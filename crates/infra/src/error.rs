//! Application-level error: everything a use case or handler can fail with.

use thiserror::Error;

use catalog_core::DomainError;
use catalog_mediator::MediatorError;

use crate::external::ExternalApiError;
use crate::repository::RepositoryError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    External(#[from] ExternalApiError),

    #[error(transparent)]
    Mediator(#[from] MediatorError),
}

impl AppError {
    pub fn not_found() -> Self {
        Self::Domain(DomainError::NotFound)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Domain(DomainError::NotFound))
    }
}
