//! Chawkbazar Core - Shared types library.
//!
//! This crate provides common types used across all Chawkbazar components:
//! - `checkout` - Client-side checkout session store
//! - `cli` - Command-line tools for inspecting and editing checkout sessions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, checkout enums, and the client-safe error envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
