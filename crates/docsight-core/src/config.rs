//! Configuration module
//!
//! Configuration is read once at startup and passed explicitly to the components that
//! need it (summarizer client, document store, upload storage). The logging filter
//! (`RUST_LOG`, `RUST_LOG_FORMAT`) and the production check used when rendering HTTP
//! errors (`ENVIRONMENT`/`APP_ENV`) read the process environment directly.

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DATABASE_URL: &str = "sqlite://document_insights.db";
const UPLOADS_DIR: &str = "uploads";
const KEYWORD_COUNT: usize = 5;

const SUMMARIZER_API_URL: &str = "https://api.sarvam.ai/v1/chat/completions";
const SUMMARIZER_MODEL: &str = "sarvam-m";
const SUMMARIZER_MAX_TOKENS: u32 = 500;
const SUMMARIZER_TEMPERATURE: f32 = 0.7;
const SUMMARIZER_TIMEOUT_SECS: u64 = 30;
const SUMMARIZER_AUTH_HEADER: &str = "api-subscription-key";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Settings for the external chat-completions summarizer.
///
/// The request shape is fixed (`{model, messages, max_tokens, temperature}`) but the
/// endpoint, model and the header carrying the credential are all configurable, since
/// providers disagree on how the key is sent.
#[derive(Clone, Debug)]
pub struct SummarizerConfig {
    /// Unset means every upload is processed in keyword-only mode.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Header name for the credential. `authorization` sends `Bearer <key>`, any
    /// other header name carries the raw key.
    pub auth_header: String,
}

impl SummarizerConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: SUMMARIZER_API_URL.to_string(),
            model: SUMMARIZER_MODEL.to_string(),
            max_tokens: SUMMARIZER_MAX_TOKENS,
            temperature: SUMMARIZER_TEMPERATURE,
            timeout_secs: SUMMARIZER_TIMEOUT_SECS,
            auth_header: SUMMARIZER_AUTH_HEADER.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub database_url: String,
    pub uploads_dir: PathBuf,
    pub keyword_count: usize,
    pub summarizer: SummarizerConfig,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = parse_or(var("SERVER_PORT"), "SERVER_PORT", SERVER_PORT)?;
        let db_max_connections =
            parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?;
        let db_timeout_seconds = parse_or(
            var("DB_TIMEOUT_SECONDS"),
            "DB_TIMEOUT_SECONDS",
            CONNECTION_TIMEOUT_SECS,
        )?;

        let summarizer = SummarizerConfig {
            api_key: var("SUMMARIZER_API_KEY").or_else(|| var("SARVAM_API_KEY")),
            api_url: var("SUMMARIZER_API_URL").unwrap_or_else(|| SUMMARIZER_API_URL.to_string()),
            model: var("SUMMARIZER_MODEL").unwrap_or_else(|| SUMMARIZER_MODEL.to_string()),
            max_tokens: parse_or(
                var("SUMMARIZER_MAX_TOKENS"),
                "SUMMARIZER_MAX_TOKENS",
                SUMMARIZER_MAX_TOKENS,
            )?,
            temperature: parse_or(
                var("SUMMARIZER_TEMPERATURE"),
                "SUMMARIZER_TEMPERATURE",
                SUMMARIZER_TEMPERATURE,
            )?,
            timeout_secs: parse_or(
                var("SUMMARIZER_TIMEOUT_SECS"),
                "SUMMARIZER_TIMEOUT_SECS",
                SUMMARIZER_TIMEOUT_SECS,
            )?,
            auth_header: var("SUMMARIZER_AUTH_HEADER")
                .unwrap_or_else(|| SUMMARIZER_AUTH_HEADER.to_string())
                .to_lowercase(),
        };

        let config = Config {
            base: BaseConfig {
                server_port,
                cors_origins,
                db_max_connections,
                db_timeout_seconds,
                environment,
            },
            database_url: var("DATABASE_URL").unwrap_or_else(|| DATABASE_URL.to_string()),
            uploads_dir: PathBuf::from(var("UPLOADS_DIR").unwrap_or_else(|| UPLOADS_DIR.to_string())),
            keyword_count: parse_or(var("KEYWORD_COUNT"), "KEYWORD_COUNT", KEYWORD_COUNT)?,
            summarizer,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a SQLite connection string (sqlite://...)"
            ));
        }

        if self.keyword_count == 0 {
            return Err(anyhow::anyhow!("KEYWORD_COUNT must be at least 1"));
        }

        if self.summarizer.timeout_secs == 0 {
            return Err(anyhow::anyhow!("SUMMARIZER_TIMEOUT_SECS must be at least 1"));
        }

        if !self.summarizer.api_url.starts_with("http://")
            && !self.summarizer.api_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "SUMMARIZER_API_URL must be an http(s) URL, got '{}'",
                self.summarizer.api_url
            ));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: '{}' ({})", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 8000);
        assert_eq!(config.database_url(), "sqlite://document_insights.db");
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.keyword_count, 5);
        assert_eq!(config.cors_origins(), &["*".to_string()]);
        assert!(!config.summarizer.is_configured());
        assert_eq!(config.summarizer.timeout_secs, 30);
        assert_eq!(config.summarizer.model, "sarvam-m");
        assert_eq!(config.summarizer.auth_header, "api-subscription-key");
    }

    #[test]
    fn test_missing_api_key_is_not_an_error() {
        let config = config_from(&[("SUMMARIZER_API_KEY", "   ")]).unwrap();
        assert!(!config.summarizer.is_configured());
    }

    #[test]
    fn test_sarvam_key_fallback() {
        let config = config_from(&[("SARVAM_API_KEY", "sk-legacy")]).unwrap();
        assert_eq!(config.summarizer.api_key.as_deref(), Some("sk-legacy"));

        let config = config_from(&[
            ("SARVAM_API_KEY", "sk-legacy"),
            ("SUMMARIZER_API_KEY", "sk-new"),
        ])
        .unwrap();
        assert_eq!(config.summarizer.api_key.as_deref(), Some("sk-new"));
    }

    #[test]
    fn test_summarizer_overrides() {
        let config = config_from(&[
            ("SUMMARIZER_API_URL", "http://localhost:9999/v1/chat/completions"),
            ("SUMMARIZER_TIMEOUT_SECS", "5"),
            ("SUMMARIZER_AUTH_HEADER", "Authorization"),
            ("SUMMARIZER_TEMPERATURE", "0.2"),
        ])
        .unwrap();
        assert_eq!(
            config.summarizer.api_url,
            "http://localhost:9999/v1/chat/completions"
        );
        assert_eq!(config.summarizer.timeout_secs, 5);
        assert_eq!(config.summarizer.auth_header, "authorization");
        assert!((config.summarizer.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        assert!(config_from(&[("ENVIRONMENT", "production")]).is_err());
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://app.example.com"),
        ])
        .unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_non_sqlite_database_rejected() {
        assert!(config_from(&[("DATABASE_URL", "postgresql://localhost/db")]).is_err());
    }

    #[test]
    fn test_zero_keyword_count_rejected() {
        assert!(config_from(&[("KEYWORD_COUNT", "0")]).is_err());
    }
}
