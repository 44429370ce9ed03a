//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `RETHREAD_STORE_PATH` - JSON file holding the cart and session (default: `.rethread/store.json`)
//! - `RETHREAD_TAX_RATE` - Sales tax as a fraction between 0 and 1 (default: 0.05)
//! - `RETHREAD_CURRENCY` - ISO 4217 code used for display (default: INR)
//! - `RETHREAD_SIMULATED_LATENCY_MS` - Artificial delay before checkout and listing submission (default: 0)
//! - `RETHREAD_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `RUST_LOG` - Standard `tracing` filter directives (default: info)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use rethread_core::CurrencyCode;

use crate::cart::DEFAULT_TAX_RATE;
use crate::providers::Latency;

const DEFAULT_STORE_PATH: &str = ".rethread/store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected `pretty` or `json`, got {s:?}")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Location of the file-backed store
    pub store_path: PathBuf,
    /// Sales tax applied to the cart subtotal
    pub tax_rate: Decimal,
    /// Display currency
    pub currency: CurrencyCode,
    /// Artificial delay for simulated network calls
    pub simulated_latency: Latency,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            tax_rate: DEFAULT_TAX_RATE,
            currency: CurrencyCode::default(),
            simulated_latency: Latency::NONE,
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store_path = lookup("RETHREAD_STORE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or(defaults.store_path, PathBuf::from);

        let tax_rate = parse_optional::<Decimal>(&lookup, "RETHREAD_TAX_RATE")?
            .unwrap_or(defaults.tax_rate);
        if tax_rate.is_sign_negative() || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "RETHREAD_TAX_RATE".to_string(),
                format!("must be between 0 and 1 (got {tax_rate})"),
            ));
        }

        let currency = parse_optional::<CurrencyCode>(&lookup, "RETHREAD_CURRENCY")?
            .unwrap_or(defaults.currency);

        let simulated_latency =
            parse_optional::<u64>(&lookup, "RETHREAD_SIMULATED_LATENCY_MS")?
                .map_or(defaults.simulated_latency, |ms| {
                    Latency(Duration::from_millis(ms))
                });

        let log_format = parse_optional::<LogFormat>(&lookup, "RETHREAD_LOG_FORMAT")?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            store_path,
            tax_rate,
            currency,
            simulated_latency,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if it is set and non-blank.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(None),
    }
}
