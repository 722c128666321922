//! The checkout session store.
//!
//! [`CheckoutStore`] owns the single [`CheckoutSession`] for a client. Reads
//! return the latest committed value. Every write:
//!
//! 1. takes the writer lock,
//! 2. builds a new session from the latest committed one with one field replaced,
//! 3. publishes it to all observers,
//! 4. writes the whole session to storage under the store's key.
//!
//! Writes are serialized end to end, so two writes issued back to back both
//! survive in memory and in storage, and storage always ends up holding the
//! last committed session.
//!
//! A failed storage write does not roll back the in-memory change; the caller
//! gets a non-fatal [`CheckoutError::Persist`] and decides whether to warn.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use chawkbazar_core::PaymentGateway;

use crate::error::CheckoutError;
use crate::session::{Address, CheckoutSession, Coupon, DeliveryTime, VerifiedResponse};
use crate::storage::{CheckoutStorage, MemoryStorage};

/// Persisted, observable checkout session store.
///
/// This struct is cheaply cloneable via `Arc`; clones are handles to the same
/// session and can be passed to every component that reads or edits it.
#[derive(Clone)]
pub struct CheckoutStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    key: String,
    storage: Arc<dyn CheckoutStorage>,
    /// Held for the whole read-modify-publish-persist sequence.
    writer: Mutex<()>,
    state: watch::Sender<Arc<CheckoutSession>>,
}

impl std::fmt::Debug for CheckoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutStore")
            .field("key", &self.inner.key)
            .field("session", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CheckoutStore {
    /// Open the store, loading the session stored under `key`.
    ///
    /// An empty slot, unreadable storage, or a stored value that doesn't
    /// parse all yield the default session. Nothing is written until the
    /// first change.
    #[instrument(skip_all)]
    pub fn open(storage: impl CheckoutStorage + 'static, key: impl Into<String>) -> Self {
        let key = key.into();
        let storage: Arc<dyn CheckoutStorage> = Arc::new(storage);
        let session = load_or_default(storage.as_ref(), &key);
        let (state, _) = watch::channel(Arc::new(session));

        Self {
            inner: Arc::new(StoreInner {
                key,
                storage,
                writer: Mutex::new(()),
                state,
            }),
        }
    }

    /// Store backed by fresh process-local storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new(), crate::config::DEFAULT_STORAGE_KEY)
    }

    /// Storage key of the session slot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> Arc<CheckoutSession> {
        Arc::clone(&self.inner.state.borrow())
    }

    /// Watch the session. The receiver sees each committed session as a whole.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<CheckoutSession>> {
        self.inner.state.subscribe()
    }

    /// Replace the session with the default and clear storage. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Persist` if the slot could not be cleared; the
    /// in-memory session is reset regardless.
    pub fn reset(&self) -> Result<(), CheckoutError> {
        let _guard = self.lock_writer();
        self.inner
            .state
            .send_replace(Arc::new(CheckoutSession::default()));

        self.inner.storage.remove(&self.inner.key).map_err(|e| {
            warn!(key = %self.inner.key, error = %e, "Failed to clear stored checkout session");
            CheckoutError::Persist(e)
        })?;

        info!(key = %self.inner.key, "Checkout session reset");
        Ok(())
    }

    /// Write the current session to storage again.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the session could not be written.
    pub fn flush(&self) -> Result<(), CheckoutError> {
        let _guard = self.lock_writer();
        let session = self.session();
        self.persist(&session)
    }

    // =========================================================================
    // Field accessors
    // =========================================================================

    #[must_use]
    pub fn billing_address(&self) -> Option<Address> {
        self.inner.state.borrow().billing_address.clone()
    }

    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_billing_address(&self, address: Option<Address>) -> Result<(), CheckoutError> {
        self.update("billing_address", |s| s.with_billing_address(address))
    }

    #[must_use]
    pub fn shipping_address(&self) -> Option<Address> {
        self.inner.state.borrow().shipping_address.clone()
    }

    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_shipping_address(&self, address: Option<Address>) -> Result<(), CheckoutError> {
        self.update("shipping_address", |s| s.with_shipping_address(address))
    }

    #[must_use]
    pub fn delivery_time(&self) -> Option<DeliveryTime> {
        self.inner.state.borrow().delivery_time.clone()
    }

    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_delivery_time(&self, time: Option<DeliveryTime>) -> Result<(), CheckoutError> {
        self.update("delivery_time", |s| s.with_delivery_time(time))
    }

    #[must_use]
    pub fn payment_gateway(&self) -> PaymentGateway {
        self.inner.state.borrow().payment_gateway
    }

    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_payment_gateway(&self, gateway: PaymentGateway) -> Result<(), CheckoutError> {
        self.update("payment_gateway", |s| s.with_payment_gateway(gateway))
    }

    /// Set the payment gateway from its wire name (`CASH_ON_DELIVERY` or `STRIPE`).
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidPaymentGateway` for any other name, in
    /// which case the session is not touched. Persistence failures are
    /// reported as for [`set_payment_gateway`](Self::set_payment_gateway).
    pub fn set_payment_gateway_name(&self, name: &str) -> Result<(), CheckoutError> {
        let gateway = name.parse::<PaymentGateway>().map_err(|_| {
            warn!(name, "Rejected unknown payment gateway");
            CheckoutError::InvalidPaymentGateway(name.to_string())
        })?;
        self.set_payment_gateway(gateway)
    }

    #[must_use]
    pub fn verification_token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_verification_token(&self, token: Option<String>) -> Result<(), CheckoutError> {
        self.update("token", |s| s.with_token(token))
    }

    #[must_use]
    pub fn customer_contact(&self) -> String {
        self.inner.state.borrow().customer_contact.clone()
    }

    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_customer_contact(&self, contact: impl Into<String>) -> Result<(), CheckoutError> {
        let contact = contact.into();
        self.update("customer_contact", |s| s.with_customer_contact(contact))
    }

    #[must_use]
    pub fn verified_response(&self) -> Option<VerifiedResponse> {
        self.inner.state.borrow().verified_response.clone()
    }

    /// Store the latest verification result; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_verified_response(
        &self,
        response: Option<VerifiedResponse>,
    ) -> Result<(), CheckoutError> {
        self.update("verified_response", |s| s.with_verified_response(response))
    }

    #[must_use]
    pub fn coupon(&self) -> Option<Coupon> {
        self.inner.state.borrow().coupon.clone()
    }

    /// Apply a coupon; `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns a non-fatal `CheckoutError` if the change could not be persisted.
    pub fn set_coupon(&self, coupon: Option<Coupon>) -> Result<(), CheckoutError> {
        self.update("coupon", |s| s.with_coupon(coupon))
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Amount of the applied coupon, or `None` without one.
    #[must_use]
    pub fn discount(&self) -> Option<Decimal> {
        self.inner.state.borrow().discount()
    }

    /// Tax plus shipping from the last verification, if there is one.
    #[must_use]
    pub fn verified_total_charges(&self) -> Option<Decimal> {
        self.inner
            .state
            .borrow()
            .verified_response
            .as_ref()
            .map(VerifiedResponse::total_charges)
    }

    /// Whether the last verification reported products that can't be ordered.
    #[must_use]
    pub fn has_unavailable_products(&self) -> bool {
        self.inner
            .state
            .borrow()
            .verified_response
            .as_ref()
            .is_some_and(|resp| !resp.unavailable_products.is_empty())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_writer(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no bad state.
        self.inner
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn update(
        &self,
        field: &'static str,
        change: impl FnOnce(&CheckoutSession) -> CheckoutSession,
    ) -> Result<(), CheckoutError> {
        let _guard = self.lock_writer();

        let base = self.session();
        let next = Arc::new(change(&base));
        self.inner.state.send_replace(Arc::clone(&next));
        debug!(key = %self.inner.key, field, "Checkout session updated");

        self.persist(&next)
    }

    fn persist(&self, session: &CheckoutSession) -> Result<(), CheckoutError> {
        let raw = serde_json::to_string(session).map_err(|e| {
            warn!(key = %self.inner.key, error = %e, "Failed to serialize checkout session");
            CheckoutError::Serialize(e)
        })?;

        self.inner.storage.save(&self.inner.key, &raw).map_err(|e| {
            warn!(
                key = %self.inner.key,
                error = %e,
                "Failed to persist checkout session; change kept in memory only"
            );
            CheckoutError::Persist(e)
        })
    }
}

/// Read the stored session, falling back to the default on any problem.
fn load_or_default(storage: &dyn CheckoutStorage, key: &str) -> CheckoutSession {
    match storage.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(session) => {
                debug!(key, "Restored checkout session");
                session
            }
            Err(e) => {
                warn!(key, error = %e, "Stored checkout session is corrupt; using default");
                CheckoutSession::default()
            }
        },
        Ok(None) => {
            debug!(key, "No stored checkout session; using default");
            CheckoutSession::default()
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read checkout session; using default");
            CheckoutSession::default()
        }
    }
}
