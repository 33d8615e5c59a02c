//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Coupons JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "coupons-json", about = "Coupons JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Shared-secret authentication settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_api_key_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from(["coupons-json", "--api-key", "s3cret"])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(config.logging.log_level, "info");
        assert!(config.logging.debug);
        assert_eq!(config.database.name, "coupons");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.timeout(), Duration::from_secs(10));
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert_eq!(config.auth.api_key.as_str(), "s3cret");

        Ok(())
    }

    #[test]
    fn api_key_is_required() {
        let result = ServerConfig::try_parse_from(["coupons-json"]);

        assert!(result.is_err(), "missing api key should be rejected");
    }
}
