//! Error types for the checkout store.

use thiserror::Error;

use chawkbazar_core::{ClientError, PaymentGateway};

/// Errors raised by a [`CheckoutStorage`](crate::CheckoutStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used as a slot name by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend cannot be used right now.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`CheckoutStore`](crate::CheckoutStore) operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A payment gateway name outside the supported set was supplied.
    /// The session is left unchanged.
    #[error("invalid payment gateway: {0}")]
    InvalidPaymentGateway(String),

    /// The session was updated in memory but could not be written to storage.
    #[error("failed to persist checkout session: {0}")]
    Persist(#[from] StorageError),

    /// The session could not be serialized.
    #[error("failed to serialize checkout session: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Whether the in-memory session was still updated despite this error.
    ///
    /// Non-fatal errors mean the change is visible for the rest of this
    /// process but may not survive a reload.
    #[must_use]
    pub const fn is_non_fatal(&self) -> bool {
        matches!(self, Self::Persist(_) | Self::Serialize(_))
    }

    /// Machine-readable reason code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidPaymentGateway(_) => "INVALID_PAYMENT_GATEWAY",
            Self::Persist(_) | Self::Serialize(_) => "CHECKOUT_NOT_SAVED",
        }
    }

    /// Render as a client-safe error without leaking storage details.
    #[must_use]
    pub fn to_client_error(&self) -> ClientError {
        let message = match self {
            Self::InvalidPaymentGateway(name) => {
                let supported: Vec<&str> =
                    PaymentGateway::ALL.iter().map(|g| g.as_str()).collect();
                format!(
                    "Unsupported payment method: {name}. Supported: {}",
                    supported.join(", ")
                )
            }
            Self::Persist(_) | Self::Serialize(_) => {
                "Your checkout could not be saved and may be lost on reload".to_string()
            }
        };
        ClientError::new(message, self.reason())
    }
}
