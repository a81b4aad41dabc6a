use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Upper bound on concurrent competitor page lookups per request.
pub const MAX_SCRAPE_CONCURRENCY: usize = 5;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Overrides the Anthropic API host, e.g. for a proxy.
    pub anthropic_base_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Timeout applied to every LLM HTTP call.
    pub llm_timeout: Duration,
    /// Timeout applied to each competitor page lookup (fetch + keyword extraction).
    pub scrape_timeout: Duration,
    pub scrape_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_timeout_secs: u64 =
            parse_or("LLM_TIMEOUT_SECS", optional_env("LLM_TIMEOUT_SECS"), 120)?;
        let scrape_timeout_secs: u64 =
            parse_or("SCRAPE_TIMEOUT_SECS", optional_env("SCRAPE_TIMEOUT_SECS"), 20)?;
        let scrape_concurrency: usize = parse_or(
            "SCRAPE_CONCURRENCY",
            optional_env("SCRAPE_CONCURRENCY"),
            MAX_SCRAPE_CONCURRENCY,
        )?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_base_url: optional_env("ANTHROPIC_BASE_URL"),
            port: parse_or("PORT", optional_env("PORT"), 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            scrape_timeout: Duration::from_secs(scrape_timeout_secs),
            scrape_concurrency: clamp_concurrency(scrape_concurrency),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `raw` as `T`, falling back to `default` when the variable is unset.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}

fn clamp_concurrency(value: usize) -> usize {
    value.clamp(1, MAX_SCRAPE_CONCURRENCY)
}
