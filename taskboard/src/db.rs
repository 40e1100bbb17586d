//! SQLite persistence.
//!
//! Every query function takes a plain connection so that callers decide
//! whether it runs inside a transaction.

mod errors;
pub mod comments;
pub mod members;
pub mod projects;
pub mod sessions;
pub mod tasks;
pub mod users;
pub mod workspaces;

use std::str::FromStr;
use log::{debug, info};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

pub use errors::DbError;

const MAX_CONNECTIONS: u32 = 8;

#[derive(Clone, Debug)]
pub struct DbPool(SqlitePool);

impl DbPool {
    /// Open the database, creating the file if it is missing, and bring the
    /// schema up to date.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        info!("connecting to database {url}");
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        let pool = DbPool(pool);
        pool.migrate().await?;
        Ok(pool)
    }

    /// A private database living as long as the pool. The single connection
    /// is never recycled, otherwise the data would vanish with it.
    pub async fn in_memory() -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let pool = DbPool(pool);
        pool.migrate().await?;
        Ok(pool)
    }

    async fn migrate(&self) -> Result<(), DbError> {
        debug!("running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.0)
            .await?;
        Ok(())
    }

    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        Ok(self.0.acquire().await?)
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DbError> {
        Ok(self.0.begin().await?)
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn close(&self) {
        self.0.close().await;
    }
}
