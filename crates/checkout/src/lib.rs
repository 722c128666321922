//! Chawkbazar checkout session store.
//!
//! Holds the single in-progress checkout session for a client (addresses,
//! payment method, delivery slot, contact, coupon, and the last server-side
//! verification result), persists it on every change, and lets any number of
//! observers watch it.
//!
//! # Modules
//!
//! - [`session`] - The session record and its field types
//! - [`store`] - [`CheckoutStore`], the only way to read or change a session
//! - [`storage`] - Persistence backends behind the [`CheckoutStorage`] trait
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;

pub use config::{CheckoutConfig, ConfigError};
pub use error::{CheckoutError, StorageError};
pub use session::{Address, CheckoutSession, Coupon, DeliveryTime, UserAddress, VerifiedResponse};
pub use storage::{CheckoutStorage, FileStorage, MemoryStorage};
pub use store::CheckoutStore;
