//! Chawkbazar CLI - checkout session inspection and management.
//!
//! The command-line surface lives here so it can be driven from tests; the
//! `cb-cli` binary only parses arguments, installs logging, and prints.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use thiserror::Error;

use chawkbazar_checkout::{CheckoutConfig, CheckoutError, CheckoutStore, ConfigError};
use chawkbazar_core::ClientError;

pub mod commands;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Invalid coupon type: {0}. Valid types: fixed, percentage, free_shipping")]
    InvalidCouponType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Render as a client-safe error envelope.
    #[must_use]
    pub fn to_client_error(&self) -> ClientError {
        match self {
            Self::Checkout(err) => err.to_client_error(),
            Self::Config(_) => ClientError::new(self.to_string(), "INVALID_CONFIG"),
            Self::InvalidCouponType(_) => ClientError::new(self.to_string(), "INVALID_COUPON"),
            Self::Json(_) => ClientError::new("Malformed JSON input", "INVALID_JSON"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Chawkbazar checkout tools")]
pub struct Cli {
    /// Session storage directory (overrides `CHECKOUT_STORAGE_DIR`)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Session storage key (overrides `CHECKOUT_STORAGE_KEY`)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the stored checkout session
    Show,
    /// Reset the checkout session and clear storage
    Reset,
    /// Set the payment gateway (`CASH_ON_DELIVERY`, `STRIPE`)
    SetGateway {
        /// Gateway name
        name: String,
    },
    /// Set the customer contact
    SetContact {
        /// Phone number or other contact identifier
        contact: String,
    },
    /// Set the verification token
    SetToken {
        /// Token returned by checkout verification
        token: String,
    },
    /// Apply a coupon
    SetCoupon {
        /// Coupon code
        #[arg(short, long)]
        code: String,

        /// Discount amount
        #[arg(short, long)]
        amount: Decimal,

        /// Coupon type (`fixed`, `percentage`, `free_shipping`)
        #[arg(short = 't', long = "type", default_value = "fixed")]
        coupon_type: String,
    },
    /// Remove the applied coupon
    ClearCoupon,
    /// Store a verification result given as JSON
    SetVerified {
        /// JSON object with `total_tax`, `shipping_charge`, `unavailable_products`
        #[arg(id = "verified_json", value_name = "JSON")]
        json: String,
    },
}

impl Cli {
    /// Resolve configuration: environment first, then command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the environment is invalid.
    pub fn config(&self) -> Result<CheckoutConfig, CliError> {
        let mut config = CheckoutConfig::from_env()?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Apply `--dir` and `--key` on top of `config`.
    pub fn apply_overrides(&self, config: &mut CheckoutConfig) {
        if let Some(dir) = &self.dir {
            config.storage_dir.clone_from(dir);
        }
        if let Some(key) = &self.key {
            config.storage_key.clone_from(key);
        }
    }
}

/// Run a command against the store described by `config`.
///
/// Returns the JSON document to print.
///
/// # Errors
///
/// Returns `CliError` if the command is rejected or the session could not be saved.
pub fn run(command: &Commands, config: &CheckoutConfig) -> Result<serde_json::Value, CliError> {
    let store = CheckoutStore::open(config.file_storage(), config.storage_key.clone());

    match command {
        Commands::Show => {}
        Commands::Reset => commands::session::reset(&store)?,
        Commands::SetGateway { name } => commands::session::set_gateway(&store, name)?,
        Commands::SetContact { contact } => commands::session::set_contact(&store, contact)?,
        Commands::SetToken { token } => commands::session::set_token(&store, token)?,
        Commands::SetCoupon {
            code,
            amount,
            coupon_type,
        } => commands::session::set_coupon(&store, code, *amount, coupon_type)?,
        Commands::ClearCoupon => commands::session::clear_coupon(&store)?,
        Commands::SetVerified { json } => commands::session::set_verified(&store, json)?,
    }

    Ok(commands::session::show(&store, config.currency))
}
