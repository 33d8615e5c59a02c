//! Auth Config

use clap::Args;
use zeroize::Zeroizing;

/// Shared-secret authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Key every request must carry in its `apiKey` field
    #[arg(long, env = "API_KEY", hide_env_values = true, value_parser = parse_secret)]
    pub api_key: Zeroizing<String>,
}

fn parse_secret(value: &str) -> Result<Zeroizing<String>, String> {
    if value.is_empty() {
        return Err("api key must not be empty".to_string());
    }

    Ok(Zeroizing::new(value.to_string()))
}
