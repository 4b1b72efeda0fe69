use anyhow::{Context, Result};
use chrono::FixedOffset;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub groq_api_key: String,
    pub clerk_webhook_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// UTC offset of the deployment's day boundary, e.g. "+05:30".
    /// Daily ledger entries roll over at local midnight under this offset.
    pub day_boundary_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            clerk_webhook_secret: require_env("CLERK_WEBHOOK_SECRET")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            day_boundary_offset: std::env::var("DAY_BOUNDARY_OFFSET")
                .unwrap_or_else(|_| "+00:00".to_string())
                .parse::<FixedOffset>()
                .context("DAY_BOUNDARY_OFFSET must be an offset like +05:30")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
