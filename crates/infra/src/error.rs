use thiserror::Error;

use catalog_auth::{LoginError, TokenError};
use catalog_core::DomainError;

use crate::repository::StoreError;

/// Error surfaced by the application services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Validation or credential failure, surfaced verbatim.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(msg) => ServiceError::Conflict(msg),
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::Backend(msg) => ServiceError::Storage(msg),
        }
    }
}

impl From<LoginError> for ServiceError {
    fn from(value: LoginError) -> Self {
        match value {
            LoginError::Credential(e) => ServiceError::Domain(e),
            LoginError::Token(e) => ServiceError::Token(e),
        }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(value: tokio::task::JoinError) -> Self {
        ServiceError::Internal(format!("blocking task failed: {value}"))
    }
}
