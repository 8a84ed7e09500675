//! Environment-based configuration.

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Runtime configuration, deserialized from environment variables
/// (optionally seeded from a `.env` file).
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Postgres connection URL.
    pub database_url: String,
    /// Base URL of the upstream ledger's export API.
    pub upstream_base_url: String,
    /// Optional bearer token for the upstream API.
    #[serde(default)]
    pub upstream_api_token: Option<String>,
    /// Address the API server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Connection-pool ceiling.
    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_db_connections() -> u32 {
    10
}

impl Config {
    /// Load configuration from the environment, reading `.env` first when
    /// one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }
}
