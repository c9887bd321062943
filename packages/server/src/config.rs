use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CERTIFICATE_BASE_URL: &str = "https://certificates.localhost";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres backend when set, in-memory otherwise
    pub database_url: Option<String>,
    /// JSON array of participant profiles seeding the directory
    pub participants_file: Option<PathBuf>,
    pub certificate_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            participants_file: env::var("PARTICIPANTS_FILE").ok().map(PathBuf::from),
            certificate_base_url: env::var("CERTIFICATE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CERTIFICATE_BASE_URL.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            participants_file: None,
            certificate_base_url: DEFAULT_CERTIFICATE_BASE_URL.to_string(),
        }
    }
}
