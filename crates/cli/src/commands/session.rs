//! Checkout session commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored session
//! cb-cli show
//!
//! # Switch to cash on delivery
//! cb-cli set-gateway CASH_ON_DELIVERY
//!
//! # Apply a coupon worth 15
//! cb-cli set-coupon -c SAVE15 -a 15
//!
//! # Start over
//! cb-cli reset
//! ```

use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::info;

use chawkbazar_checkout::{CheckoutStore, Coupon, VerifiedResponse};
use chawkbazar_core::{CouponType, CurrencyCode, Price};

use crate::CliError;

/// Session plus derived values, formatted in `currency`.
#[must_use]
pub fn show(store: &CheckoutStore, currency: CurrencyCode) -> Value {
    let session = store.session();

    json!({
        "key": store.key(),
        "session": &*session,
        "discount": session.coupon.as_ref().map(|coupon| format_discount(coupon, currency)),
        "verified_total_charges": store
            .verified_total_charges()
            .map(|amount| Price::new(amount, currency).to_string()),
        "has_unavailable_products": store.has_unavailable_products(),
    })
}

/// Human-readable discount for a coupon, according to its type.
fn format_discount(coupon: &Coupon, currency: CurrencyCode) -> String {
    match coupon.coupon_type {
        CouponType::Fixed => Price::new(coupon.amount, currency).to_string(),
        CouponType::Percentage => format!("{}%", coupon.amount.normalize()),
        CouponType::FreeShipping => "free shipping".to_string(),
    }
}

/// Reset the session.
///
/// # Errors
///
/// Returns `CliError::Checkout` if storage could not be cleared.
pub fn reset(store: &CheckoutStore) -> Result<(), CliError> {
    store.reset()?;
    Ok(())
}

/// Set the payment gateway by name.
///
/// # Errors
///
/// Returns `CliError::Checkout` for an unknown gateway or a failed save.
pub fn set_gateway(store: &CheckoutStore, name: &str) -> Result<(), CliError> {
    store.set_payment_gateway_name(name)?;
    info!(gateway = name, "Payment gateway updated");
    Ok(())
}

/// Set the customer contact.
///
/// # Errors
///
/// Returns `CliError::Checkout` if the session could not be saved.
pub fn set_contact(store: &CheckoutStore, contact: &str) -> Result<(), CliError> {
    store.set_customer_contact(contact)?;
    Ok(())
}

/// Set the verification token.
///
/// # Errors
///
/// Returns `CliError::Checkout` if the session could not be saved.
pub fn set_token(store: &CheckoutStore, token: &str) -> Result<(), CliError> {
    store.set_verification_token(Some(token.to_string()))?;
    Ok(())
}

/// Apply a coupon.
///
/// # Errors
///
/// Returns `CliError::InvalidCouponType` for an unknown type, or
/// `CliError::Checkout` if the session could not be saved.
pub fn set_coupon(
    store: &CheckoutStore,
    code: &str,
    amount: Decimal,
    coupon_type: &str,
) -> Result<(), CliError> {
    let coupon_type: CouponType = coupon_type
        .parse()
        .map_err(|_| CliError::InvalidCouponType(coupon_type.to_owned()))?;

    store.set_coupon(Some(Coupon::new(code, coupon_type, amount)))?;
    info!(code, %amount, %coupon_type, "Coupon applied");
    Ok(())
}

/// Remove the applied coupon.
///
/// # Errors
///
/// Returns `CliError::Checkout` if the session could not be saved.
pub fn clear_coupon(store: &CheckoutStore) -> Result<(), CliError> {
    store.set_coupon(None)?;
    Ok(())
}

/// Store a verification result; the JSON literal `null` clears it.
///
/// # Errors
///
/// Returns `CliError::Json` for malformed input, or `CliError::Checkout` if
/// the session could not be saved.
pub fn set_verified(store: &CheckoutStore, raw: &str) -> Result<(), CliError> {
    let response: Option<VerifiedResponse> = serde_json::from_str(raw)?;
    store.set_verified_response(response)?;
    Ok(())
}
