//! Database Config

use std::time::Duration;

use clap::Args;
use sqlx::postgres::PgConnectOptions;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` host
    #[arg(id = "db-host", long = "db-host", env = "DB_HOST", default_value = "localhost")]
    pub host: String,

    /// `PostgreSQL` port
    #[arg(id = "db-port", long = "db-port", env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,

    /// Database name
    #[arg(long = "db-name", env = "DB_NAME", default_value = "coupons")]
    pub name: String,

    /// Database user
    #[arg(long = "db-user", env = "DB_USER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(
        long = "db-password",
        env = "DB_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Deadline in seconds for each storage call
    #[arg(long = "context-timeout", env = "CONTEXT_TIMEOUT", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
