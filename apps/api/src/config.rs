use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::generation::batch::{BatchConfig, DEFAULT_ITEM_DELAY_SECS};
use crate::generation::optimizer::{OptimizeConfig, DEFAULT_OPTIMIZE_DELAY_MILLIS};
use crate::llm_client::retry::{RetryPolicy, DEFAULT_BASE_SECS};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but unparsable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server-side Gemini key. Requests may bring their own instead.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub retry_base_secs: u64,
    pub batch_delay_secs: u64,
    pub optimize_delay_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            retry_base_secs: DEFAULT_BASE_SECS,
            batch_delay_secs: DEFAULT_ITEM_DELAY_SECS,
            optimize_delay_millis: DEFAULT_OPTIMIZE_DELAY_MILLIS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let defaults = Config::default();

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            retry_base_secs: parse_env("RETRY_BASE_SECS", defaults.retry_base_secs)?,
            batch_delay_secs: parse_env("BATCH_DELAY_SECS", defaults.batch_delay_secs)?,
            optimize_delay_millis: parse_env(
                "OPTIMIZE_DELAY_MILLIS",
                defaults.optimize_delay_millis,
            )?,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_base_secs(self.retry_base_secs)
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            retry: self.retry_policy(),
            item_delay: Duration::from_secs(self.batch_delay_secs),
        }
    }

    pub fn optimize_config(&self) -> OptimizeConfig {
        OptimizeConfig {
            retry: self.retry_policy(),
            pause: Duration::from_millis(self.optimize_delay_millis),
        }
    }
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
