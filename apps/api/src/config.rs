use anyhow::{Context, Result};

use crate::layout::sheet::DEFAULT_FALLBACK_TITLE;

const DEFAULT_PDF_FILENAME: &str = "30-seconds-cards.pdf";

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults reproduce the standard card sheet.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Title drawn on the accent strip when a request leaves it blank.
    pub fallback_title: String,
    /// File name offered in the PDF download header.
    pub pdf_filename: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            fallback_title: env_or("CARD_FALLBACK_TITLE", DEFAULT_FALLBACK_TITLE),
            pdf_filename: env_or("PDF_FILENAME", DEFAULT_PDF_FILENAME),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            pdf_filename: DEFAULT_PDF_FILENAME.to_string(),
        }
    }
}

/// Reads `key`, treating unset and blank values as `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
