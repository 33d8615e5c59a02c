//! Database connection management

use std::{future::Future, time::Duration};

use sqlx::{
    PgPool,
    migrate::MigrateError,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use thiserror::Error;
use tokio::time::timeout;

/// Failure of a single bounded store call.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("storage call exceeded {0:?}")]
    Timeout(Duration),

    #[error("storage error: {0}")]
    Sql(#[source] sqlx::Error),
}

/// Pool handle shared by every request, paired with the per-call deadline.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a store operation under the configured deadline.
    ///
    /// The operation future is dropped when the deadline passes, which releases
    /// any connection or transaction it holds.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Timeout`] when the deadline passes first, or
    /// [`DbError::Sql`] when the operation itself fails.
    pub async fn bounded<T, F>(&self, operation: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        timeout(self.timeout, operation)
            .await
            .map_err(|_elapsed| DbError::Timeout(self.timeout))?
            .map_err(DbError::Sql)
    }
}

/// Connect to `PostgreSQL`, bounding pool acquisition by `acquire_timeout`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    options: PgConnectOptions,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    #[tokio::test]
    async fn bounded_returns_operation_result() -> TestResult {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone(), Duration::from_secs(5));

        let value: i32 = db
            .bounded(sqlx::query_scalar("SELECT 1").fetch_one(db.pool()))
            .await?;

        assert_eq!(value, 1);

        Ok(())
    }

    #[tokio::test]
    async fn bounded_times_out_slow_operation() {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone(), Duration::from_millis(50));

        let result = db
            .bounded(sqlx::query("SELECT pg_sleep(1)").execute(db.pool()))
            .await;

        assert!(
            matches!(result, Err(DbError::Timeout(_))),
            "expected Timeout, got {result:?}"
        );
    }
}
