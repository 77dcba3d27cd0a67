use anyhow::{Context, Result};

use crate::models::settings::{DEFAULT_FONT, DEFAULT_FONT_SIZE};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Without a database the workspace lives in memory and settings are empty.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    pub default_font: String,
    pub default_font_size: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            jwt_secret: require_env("JWT_SECRET")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_font: optional_env("DEFAULT_FONT").unwrap_or_else(|| DEFAULT_FONT.to_string()),
            default_font_size: match optional_env("DEFAULT_FONT_SIZE") {
                Some(raw) => parse_font_size(&raw)?,
                None => DEFAULT_FONT_SIZE,
            },
        })
    }

    /// Configuration for tests: no database, fixed secret.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            default_font: DEFAULT_FONT.to_string(),
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_font_size(raw: &str) -> Result<f32> {
    let size = raw
        .trim()
        .parse::<f32>()
        .context("DEFAULT_FONT_SIZE must be a number")?;
    anyhow::ensure!(size > 0.0, "DEFAULT_FONT_SIZE must be positive");
    Ok(size)
}
