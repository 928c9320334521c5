//! Validated workflows on top of the repository traits.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod people;
pub mod tools;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
