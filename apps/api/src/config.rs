use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::GROQ_API_URL;

/// Application configuration loaded from environment variables.
///
/// The model credential is optional at startup: without it the service still
/// boots, and every review is rejected before any model call is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub catalog_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_mb = std::env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_api_url: optional_env("GROQ_API_URL").unwrap_or_else(|| GROQ_API_URL.to_string()),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank values the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config used by router tests; never touches the process environment.
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: Some("test-key".to_string()),
            groq_api_url: GROQ_API_URL.to_string(),
            catalog_path: None,
            max_upload_bytes: 5 * 1024 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
