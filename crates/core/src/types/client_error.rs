//! Client-safe error envelope.
//!
//! Errors that cross into a customer-facing surface are rendered as a
//! [`ClientError`]: a message that is safe to show, a machine-readable
//! reason, and a fixed category. The `extensions` payload mirrors what the
//! backend API returns in the `extensions` part of an error response.

use serde::Serialize;
use serde_json::{Value, json};

/// Category reported by every [`ClientError`].
pub const CLIENT_ERROR_CATEGORY: &str = "chawkbazar";

/// An error whose message may be displayed to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    reason: String,
}

impl ClientError {
    /// Create a new client error.
    pub fn new(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reason: reason.into(),
        }
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The machine-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Whether the message is safe to display to a client. Always true.
    #[must_use]
    pub const fn is_client_safe(&self) -> bool {
        true
    }

    /// Category of the error.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        CLIENT_ERROR_CATEGORY
    }

    /// Content for the `extensions` part of an error response.
    #[must_use]
    pub fn extensions(&self) -> Value {
        json!({ "reason": self.reason })
    }

    /// Full error response body: message plus extensions.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message,
            "extensions": {
                "category": self.category(),
                "reason": self.reason,
            },
        })
    }
}
