//! Integration tests for file-backed checkout sessions.
//!
//! Each test opens one store, changes it, then opens a fresh store on the
//! same directory to check what actually reached disk.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chawkbazar_checkout::{
    Address, CheckoutSession, Coupon, DeliveryTime, UserAddress, VerifiedResponse,
};
use chawkbazar_core::{AddressId, AddressType, CouponType, PaymentGateway};
use chawkbazar_integration_tests::TestContext;
use rust_decimal::Decimal;

fn billing_address() -> Address {
    Address {
        id: Some(AddressId::new(11)),
        title: "Billing".to_string(),
        address_type: AddressType::Billing,
        address: UserAddress {
            street_address: "500 Market St".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            zip: "94105".to_string(),
            country: "USA".to_string(),
        },
        customer_id: None,
    }
}

fn coupon() -> Coupon {
    Coupon::new("WELCOME15", CouponType::Fixed, Decimal::new(15, 0))
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_fresh_directory_gives_default_session() {
    let ctx = TestContext::new();
    let store = ctx.open_store();

    assert_eq!(*store.session(), CheckoutSession::default());
    assert!(!ctx.session_file().exists(), "opening must not write");
}

#[test]
fn test_billing_address_survives_reopen() {
    let ctx = TestContext::new();
    ctx.open_store()
        .set_billing_address(Some(billing_address()))
        .unwrap();

    assert_eq!(ctx.open_store().billing_address(), Some(billing_address()));
}

#[test]
fn test_full_session_survives_reopen() {
    let ctx = TestContext::new();
    let store = ctx.open_store();
    let slot = DeliveryTime {
        id: "2".to_string(),
        title: "Morning".to_string(),
        description: "8.00 AM - 11.00 AM".to_string(),
    };
    let verified = VerifiedResponse {
        total_tax: Decimal::new(350, 2),
        shipping_charge: Decimal::new(1000, 2),
        unavailable_products: vec![],
    };

    store.set_billing_address(Some(billing_address())).unwrap();
    store.set_delivery_time(Some(slot.clone())).unwrap();
    store
        .set_payment_gateway(PaymentGateway::CashOnDelivery)
        .unwrap();
    store.set_customer_contact("+8801700000000").unwrap();
    store.set_verified_response(Some(verified.clone())).unwrap();
    store.set_coupon(Some(coupon())).unwrap();
    store
        .set_verification_token(Some("tok_abc".to_string()))
        .unwrap();

    let reopened = ctx.open_store();
    assert_eq!(reopened.session(), store.session());
    assert_eq!(reopened.delivery_time(), Some(slot));
    assert_eq!(reopened.verified_response(), Some(verified));
    assert_eq!(reopened.discount(), Some(Decimal::new(15, 0)));
    assert_eq!(reopened.verified_total_charges(), Some(Decimal::new(1350, 2)));
}

#[test]
fn test_reset_removes_session_file() {
    let ctx = TestContext::new();
    let store = ctx.open_store();
    store.set_coupon(Some(coupon())).unwrap();
    assert!(ctx.session_file().exists());

    store.reset().unwrap();
    assert!(!ctx.session_file().exists());
    assert_eq!(*ctx.open_store().session(), CheckoutSession::default());
}

#[test]
fn test_interleaved_writes_are_all_stored() {
    let ctx = TestContext::new();
    let store = ctx.open_store();

    store.set_billing_address(Some(billing_address())).unwrap();
    store.set_coupon(Some(coupon())).unwrap();

    let reopened = ctx.open_store();
    assert_eq!(reopened.billing_address(), Some(billing_address()));
    assert_eq!(reopened.coupon(), Some(coupon()));
}

#[test]
fn test_concurrent_writers_on_shared_handle() {
    let ctx = TestContext::new();
    let store = ctx.open_store();

    std::thread::scope(|scope| {
        for i in 0..8u32 {
            let store = store.clone();
            scope.spawn(move || {
                if i % 2 == 0 {
                    store.set_customer_contact(format!("contact-{i}")).unwrap();
                } else {
                    store.set_billing_address(Some(billing_address())).unwrap();
                }
            });
        }
    });
    store.set_coupon(Some(coupon())).unwrap();

    let reopened = ctx.open_store();
    assert_eq!(reopened.session(), store.session());
    assert!(reopened.customer_contact().starts_with("contact-"));
    assert_eq!(reopened.billing_address(), Some(billing_address()));
    assert_eq!(reopened.coupon(), Some(coupon()));
}

#[test]
fn test_corrupt_file_falls_back_to_default() {
    let ctx = TestContext::new();
    std::fs::write(ctx.session_file(), b"\x00\x01 definitely not json").unwrap();

    let store = ctx.open_store();
    assert_eq!(*store.session(), CheckoutSession::default());

    // The next write replaces the corrupt file.
    store.set_customer_contact("recovered").unwrap();
    assert_eq!(ctx.open_store().customer_contact(), "recovered");
}

#[test]
fn test_invalid_gateway_does_not_touch_disk() {
    let ctx = TestContext::new();
    let store = ctx.open_store();

    assert!(store.set_payment_gateway_name("BITCOIN").is_err());
    assert!(!ctx.session_file().exists());
    assert_eq!(store.payment_gateway(), PaymentGateway::Stripe);
}

// =============================================================================
// Observers
// =============================================================================

#[tokio::test]
async fn test_observer_receives_whole_sessions() {
    let ctx = TestContext::new();
    let store = ctx.open_store();
    let mut rx = store.subscribe();

    let writer = store.clone();
    tokio::task::spawn_blocking(move || {
        writer.set_billing_address(Some(billing_address())).unwrap();
        writer.set_coupon(Some(coupon())).unwrap();
    })
    .await
    .unwrap();

    rx.changed().await.unwrap();
    let seen: Arc<CheckoutSession> = Arc::clone(&rx.borrow_and_update());
    assert_eq!(seen.billing_address, Some(billing_address()));
    assert_eq!(seen.coupon, Some(coupon()));
}
