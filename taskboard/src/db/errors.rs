use sqlx::migrate::MigrateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] MigrateError),

    #[error("unique constraint violated")]
    UniqueViolation,
}

impl DbError {
    pub(crate) fn from_insert(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() =>
                DbError::UniqueViolation,
            e => DbError::Sqlx(e),
        }
    }
}
