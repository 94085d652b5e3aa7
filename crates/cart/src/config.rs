//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORE_DIR` - Directory holding the cart record (default: .museum-cart)
//! - `CART_STORE_KEY` - Versioned record name (default: museumCartV1)
//! - `CART_TAX_RATE` - Sales tax as a fraction (default: 0.102)
//! - `CART_MEMBER_DISCOUNT_RATE` - Member discount as a fraction (default: 0.15)
//! - `CART_SHIPPING_FLAT_RATE` - Flat shipping fee in dollars (default: 25.00)

use std::path::PathBuf;

use museum_cart_core::Money;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::{PricingConfig, VolumeTiers};
use crate::store::StorageKey;

const DEFAULT_STORE_DIR: &str = ".museum-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory for file-backed storage
    pub store_dir: PathBuf,
    /// Name of the persisted cart record
    pub store_key: StorageKey,
    /// Rates and fees used for invoices
    pub pricing: PricingConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            store_key: StorageKey::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not
    /// parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store_dir = PathBuf::from(get_env_or_default("CART_STORE_DIR", DEFAULT_STORE_DIR));
        let store_key = match get_optional_env("CART_STORE_KEY") {
            Some(raw) => StorageKey::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("CART_STORE_KEY".to_string(), e.to_string())
            })?,
            None => StorageKey::default(),
        };
        let pricing = PricingConfig::from_env()?;

        Ok(Self {
            store_dir,
            store_key,
            pricing,
        })
    }
}

impl PricingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            tax_rate: get_rate("CART_TAX_RATE", Self::DEFAULT_TAX_RATE)?,
            member_discount_rate: get_rate(
                "CART_MEMBER_DISCOUNT_RATE",
                Self::DEFAULT_MEMBER_DISCOUNT_RATE,
            )?,
            shipping_flat_rate: Money::new(get_amount(
                "CART_SHIPPING_FLAT_RATE",
                Self::DEFAULT_SHIPPING_FLAT_RATE,
            )?),
            tiers: VolumeTiers::default(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a fraction in `[0, 1]`, falling back to `default` when unset.
fn get_rate(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| parse_rate(key, &raw))
}

/// Read a non-negative amount, falling back to `default` when unset.
fn get_amount(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| parse_amount(key, &raw))
}

fn parse_decimal(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a rate fraction and check it lies in `[0, 1]`.
fn parse_rate(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let rate = parse_decimal(key, raw)?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be a fraction between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Parse a dollar amount and check it is not negative.
fn parse_amount(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let amount = parse_decimal(key, raw)?;
    if amount < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("cannot be negative (got {amount})"),
        ));
    }
    Ok(amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.store_dir, PathBuf::from(".museum-cart"));
        assert_eq!(config.store_key.as_str(), "museumCartV1");
        assert_eq!(config.pricing.tax_rate, Decimal::new(102, 3));
        assert_eq!(config.pricing.member_discount_rate, Decimal::new(15, 2));
        assert_eq!(config.pricing.shipping_flat_rate.amount(), Decimal::new(25, 0));
    }

    #[test]
    fn test_parse_rate_valid() {
        assert_eq!(parse_rate("TEST_VAR", "0.08").unwrap(), Decimal::new(8, 2));
        assert_eq!(parse_rate("TEST_VAR", " 1 ").unwrap(), Decimal::ONE);
        assert_eq!(parse_rate("TEST_VAR", "0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_rate_out_of_range() {
        let err = parse_rate("TEST_VAR", "10.2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TEST_VAR"));
        assert!(parse_rate("TEST_VAR", "-0.1").is_err());
    }

    #[test]
    fn test_parse_rate_not_numeric() {
        assert!(parse_rate("TEST_VAR", "ten percent").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("TEST_VAR", "12.50").unwrap(), Decimal::new(1250, 2));
        assert!(parse_amount("TEST_VAR", "-1").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidEnvVar("CART_TAX_RATE".to_string(), "bad".to_string());
        assert_eq!(err.to_string(), "Invalid environment variable CART_TAX_RATE: bad");
    }
}
