use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sqlx::{PgPool, postgres::PgConnectOptions};

use coupons_app::database;

mod migrate;
mod search;

#[derive(Debug, Parser)]
#[command(name = "coupons-app", about = "Coupons CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(DatabaseArgs),

    /// Search coupons with a JSON filter and print the matches
    Search(search::SearchArgs),
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Per-call storage timeout in seconds
    #[arg(long, env = "CONTEXT_TIMEOUT", default_value_t = 10)]
    timeout_secs: u64,
}

impl DatabaseArgs {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        let options: PgConnectOptions = self
            .database_url
            .parse()
            .map_err(|error| format!("invalid database url: {error}"))?;

        database::connect(options, self.timeout())
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Search(args) => search::run(args).await,
        }
    }
}
