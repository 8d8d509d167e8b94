//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file in the working directory is read first (see
//! `main.rs`), real environment variables take precedence.
//!
//! ## Variables
//!
//! - `HOST` - Bind host (default: `localhost`)
//! - `PORT` - Bind port (default: `8080`)
//! - `DB_PATH` - Store file (default: `shortener.db`)
//! - `API_KEY` - Key required by `/api/*` (default: `your-api-key-here`)
//! - `BASE_URL` - Public prefix of short URLs (default: `http://localhost:8080`)
//! - `CODE_LENGTH` - Symbols per generated code, 4 to 64 (default: `8`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;

use crate::utils::code_generator::DEFAULT_CODE_LENGTH;

/// Placeholder key shipped in the defaults. Running with it is allowed but
/// logged as a warning.
pub const DEFAULT_API_KEY: &str = "your-api-key-here";

const MIN_CODE_LENGTH: usize = 4;
const MAX_CODE_LENGTH: usize = 64;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub api_key: String,
    pub base_url: String,
    pub code_length: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            db_path: "shortener.db".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: "http://localhost:8080".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for unset ones.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `CODE_LENGTH` is set but not a number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{v}'"))?,
            Err(_) => defaults.port,
        };

        let code_length = match env::var("CODE_LENGTH") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("CODE_LENGTH must be a number, got '{v}'"))?,
            Err(_) => defaults.code_length,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            db_path: env::var("DB_PATH").unwrap_or(defaults.db_path),
            api_key: env::var("API_KEY").unwrap_or(defaults.api_key),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            code_length,
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_key` or `db_path` is empty
    /// - `base_url` is not an `http://` or `https://` URL
    /// - `code_length` is outside 4..=64
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("API_KEY must not be empty");
        }

        if self.db_path.is_empty() {
            anyhow::bail!("DB_PATH must not be empty");
        }

        if self.host.is_empty() {
            anyhow::bail!("HOST must not be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                self.code_length
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Address the server binds to, as `host:port`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns whether the placeholder API key is still in use.
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }

    /// Prints configuration summary (API key masked).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!("  Store: {}", self.db_path);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  API key: {}", mask_secret(&self.api_key));
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.uses_default_api_key() {
            tracing::warn!("API_KEY is the default placeholder; set a real key before exposing the service");
        }
    }
}

/// Masks a secret for logging, keeping at most its first four characters.
///
/// Short secrets are hidden entirely.
fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }

    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
