use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// How many venues and artists the landing page lists.
    pub recent_listings_limit: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            recent_listings_limit: env::var("RECENT_LISTINGS_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("RECENT_LISTINGS_LIMIT must be a positive integer")?,
        })
    }
}
