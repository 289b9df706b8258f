//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (per command, e.g. `--overhead`)
//! 2. Environment variables (`TALLY_*`)
//! 3. Defaults (this file)
//!
//! | Variable                  | Default                     |
//! |---------------------------|-----------------------------|
//! | `TALLY_OVERHEAD_PCT`      | `44.33`                     |
//! | `TALLY_PRICING_MODE`      | `revenue-target`            |
//! | `TALLY_STRICT_PRICING`    | `false`                     |
//! | `TALLY_API_URL`           | `http://localhost:3000/api` |
//! | `TALLY_HTTP_TIMEOUT_SECS` | `30`                        |
//! | `TALLY_LOG`               | `info`                      |
//!
//! `TALLY_OVERHEAD_PCT=legacy` selects the overhead of the older product
//! form ([`LEGACY_OVERHEAD_PCT`]).

use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

use tally_core::input::optional_number;
use tally_core::pricing::PricingEngine;
use tally_core::types::{Percent, PricingMode};
use tally_core::{DEFAULT_OVERHEAD_PCT, LEGACY_OVERHEAD_PCT};
use tally_store::{StoreConfig, DEFAULT_API_URL};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Administrative overhead, percent of the sale price.
    pub overhead_pct: Percent,

    pub pricing_mode: PricingMode,

    /// Refuse degenerate prices instead of printing zero.
    pub strict_pricing: bool,

    /// REST collection for `remote` commands.
    pub api_url: String,

    pub http_timeout: Duration,

    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            overhead_pct: Percent::new(DEFAULT_OVERHEAD_PCT),
            pricing_mode: PricingMode::default(),
            strict_pricing: false,
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(raw) = lookup("TALLY_OVERHEAD_PCT") {
            let parsed = if raw.trim().eq_ignore_ascii_case("legacy") {
                Some(LEGACY_OVERHEAD_PCT)
            } else {
                optional_number(&raw)
            };
            let pct = parsed
                .filter(|pct| *pct >= Decimal::ZERO && *pct < Decimal::ONE_HUNDRED)
                .ok_or_else(|| ConfigError::InvalidValue("TALLY_OVERHEAD_PCT".to_string()))?;
            config.overhead_pct = Percent::new(pct);
        }

        if let Some(raw) = lookup("TALLY_PRICING_MODE") {
            config.pricing_mode = PricingMode::from_str(raw.trim())
                .map_err(|_| ConfigError::InvalidValue("TALLY_PRICING_MODE".to_string()))?;
        }

        if let Some(raw) = lookup("TALLY_STRICT_PRICING") {
            config.strict_pricing = parse_flag(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("TALLY_STRICT_PRICING".to_string()))?;
        }

        if let Some(raw) = lookup("TALLY_API_URL") {
            let url = raw.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue("TALLY_API_URL".to_string()));
            }
            config.api_url = url.to_string();
        }

        if let Some(raw) = lookup("TALLY_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue("TALLY_HTTP_TIMEOUT_SECS".to_string()))?;
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("TALLY_LOG") {
            if !raw.trim().is_empty() {
                config.log_filter = raw.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Engine for `mode`, falling back to the configured mode.
    pub fn engine(&self, mode: Option<PricingMode>, overhead: Option<Percent>) -> PricingEngine {
        let overhead = overhead.unwrap_or(self.overhead_pct);
        PricingEngine::new(overhead, mode.unwrap_or(self.pricing_mode))
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.api_url.clone()).timeout(self.http_timeout)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
