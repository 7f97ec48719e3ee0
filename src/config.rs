//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Base URL of the student document store; unset means the source is
    /// unavailable and every request serves synthetic data
    pub store_url: Option<String>,

    /// Timeout for one store fetch, in seconds
    pub store_timeout_secs: u64,

    /// Hard cap on cohort size; larger fetches are truncated
    pub max_cohort: usize,

    /// Size of the synthetic fallback cohort
    pub synthetic_cohort_size: usize,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            store_url: env::var("STORE_URL").ok().filter(|url| !url.is_empty()),

            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),

            max_cohort: env::var("MAX_COHORT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10_000),

            synthetic_cohort_size: env::var("SYNTHETIC_COHORT_SIZE")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(crate::source::synthetic::DEFAULT_COHORT_SIZE),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }
}
