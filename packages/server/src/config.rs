use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Bearer token for admin queries and mutations. Admin API is off when unset.
    pub admin_api_token: Option<String>,
    pub enrichment_enabled: bool,
    pub enrichment_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://directory.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_api_token: env::var("ADMIN_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            enrichment_enabled: env::var("ENRICHMENT_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
            enrichment_timeout_secs: env::var("ENRICHMENT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("ENRICHMENT_TIMEOUT_SECS must be a whole number of seconds")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        })
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
