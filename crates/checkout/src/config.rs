//! Checkout store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHECKOUT_STORAGE_DIR` - Directory for file-backed sessions (default: .chawkbazar)
//! - `CHECKOUT_STORAGE_KEY` - Storage key of the session slot (default: chawkbazar-checkout)
//! - `CHECKOUT_CURRENCY` - Currency used when displaying amounts (default: USD)

use std::path::PathBuf;

use chawkbazar_core::CurrencyCode;
use thiserror::Error;

use crate::storage::FileStorage;

/// Default storage key for the checkout session slot.
pub const DEFAULT_STORAGE_KEY: &str = "chawkbazar-checkout";

/// Default directory for file-backed sessions.
pub const DEFAULT_STORAGE_DIR: &str = ".chawkbazar";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Directory holding the session file
    pub storage_dir: PathBuf,
    /// Key the session is stored under
    pub storage_key: String,
    /// Currency for displaying amounts
    pub currency: CurrencyCode,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but empty or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but empty or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = non_empty(&lookup, "CHECKOUT_STORAGE_DIR")?
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        let storage_key = non_empty(&lookup, "CHECKOUT_STORAGE_KEY")?
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let currency = non_empty(&lookup, "CHECKOUT_CURRENCY")?
            .map(|raw| {
                raw.parse::<CurrencyCode>()
                    .map_err(|e| ConfigError::InvalidEnvVar("CHECKOUT_CURRENCY".to_string(), e))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
        })
    }

    /// File storage rooted at the configured directory.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}

/// Get an optional variable, rejecting values that are set but blank.
fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        other => Ok(other),
    }
}
