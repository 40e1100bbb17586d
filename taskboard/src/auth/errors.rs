use thiserror::Error;
use crate::access_token::AccessTokenGeneratorError;
use crate::db::DbError;
use crate::hasher::HasherError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token format error")]
    HeaderFormat,

    #[error("invalid token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("{0}")]
    Validation(String),

    #[error("database failure: {0}")]
    Db(#[from] DbError),

    #[error(transparent)]
    Hasher(#[from] HasherError),

    #[error(transparent)]
    AccessTokenGenerator(#[from] AccessTokenGeneratorError),
}
