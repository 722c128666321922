//! Core types for Chawkbazar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod client_error;
pub mod id;
pub mod price;
pub mod status;

pub use client_error::ClientError;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
