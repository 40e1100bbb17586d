use log::error;
use thiserror::Error;
use crate::db::DbError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal server error")]
    Internal(#[source] DbError),
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        error!("persistence failure: {value}");
        ServiceError::Internal(value)
    }
}
