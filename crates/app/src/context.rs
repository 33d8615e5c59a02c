//! App Context

use std::{sync::Arc, time::Duration};

use sqlx::{migrate::MigrateError, postgres::PgConnectOptions};
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, SharedSecretAuth},
    database::{self, Db},
    domain::coupons::{CouponsService, PgCouponsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

/// Services shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub coupons: Arc<dyn CouponsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect to the database, apply migrations and build the services.
    ///
    /// `timeout` bounds every store call as well as pool acquisition.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn connect(
        options: PgConnectOptions,
        timeout: Duration,
        api_key: String,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(options, timeout)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        info!(timeout_ms = timeout.as_millis(), "database ready");

        Ok(Self {
            coupons: Arc::new(PgCouponsService::new(Db::new(pool, timeout))),
            auth: Arc::new(SharedSecretAuth::new(api_key)),
        })
    }
}
