//! Integration tests for the checkout CLI.
//!
//! Arguments are parsed with the real `clap` definitions and run against a
//! temporary storage directory.

#![allow(clippy::unwrap_used)]

use clap::Parser;

use chawkbazar_checkout::CheckoutError;
use chawkbazar_cli::{Cli, CliError, run};
use chawkbazar_core::PaymentGateway;
use chawkbazar_integration_tests::TestContext;

fn exec(ctx: &TestContext, args: &[&str]) -> Result<serde_json::Value, CliError> {
    let mut argv = vec!["cb-cli"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut config = ctx.config();
    cli.apply_overrides(&mut config);
    run(&cli.command, &config)
}

#[test]
fn test_show_empty_session() {
    let ctx = TestContext::new();
    let out = exec(&ctx, &["show"]).unwrap();

    assert_eq!(out["session"]["payment_gateway"], "STRIPE");
    assert!(out["discount"].is_null());
}

#[test]
fn test_set_coupon_then_show() {
    let ctx = TestContext::new();
    exec(&ctx, &["set-coupon", "--code", "SAVE15", "--amount", "15"]).unwrap();

    let out = exec(&ctx, &["show"]).unwrap();
    assert_eq!(out["discount"], "$15.00");
    assert_eq!(out["session"]["coupon"]["type"], "fixed");

    exec(&ctx, &["clear-coupon"]).unwrap();
    assert!(exec(&ctx, &["show"]).unwrap()["discount"].is_null());
}

#[test]
fn test_set_gateway_validation() {
    let ctx = TestContext::new();
    exec(&ctx, &["set-gateway", "CASH_ON_DELIVERY"]).unwrap();
    assert_eq!(ctx.open_store().payment_gateway(), PaymentGateway::CashOnDelivery);

    let err = exec(&ctx, &["set-gateway", "BITCOIN"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Checkout(CheckoutError::InvalidPaymentGateway(_))
    ));
    let body = err.to_client_error().to_json();
    assert_eq!(body["extensions"]["reason"], "INVALID_PAYMENT_GATEWAY");
    assert_eq!(ctx.open_store().payment_gateway(), PaymentGateway::CashOnDelivery);
}

#[test]
fn test_reset_via_cli() {
    let ctx = TestContext::new();
    exec(&ctx, &["set-contact", "+15555550100"]).unwrap();
    exec(&ctx, &["set-token", "tok_9"]).unwrap();
    assert!(ctx.session_file().exists());

    let out = exec(&ctx, &["reset"]).unwrap();
    assert_eq!(out["session"]["customer_contact"], "");
    assert!(!ctx.session_file().exists());
}

#[test]
fn test_key_override_uses_separate_slot() {
    let ctx = TestContext::new();
    exec(&ctx, &["--key", "other-checkout", "set-contact", "someone"]).unwrap();

    assert_eq!(ctx.open_store().customer_contact(), "");
    assert!(ctx.dir().join("other-checkout.json").exists());
}

#[test]
fn test_set_verified_rejects_bad_json() {
    let ctx = TestContext::new();
    let err = exec(&ctx, &["set-verified", "{not json"]).unwrap_err();
    assert!(matches!(err, CliError::Json(_)));
}

#[test]
fn test_percentage_coupon_shown_as_percent() {
    let ctx = TestContext::new();
    exec(
        &ctx,
        &["set-coupon", "-c", "TENOFF", "-a", "10", "--type", "percentage"],
    )
    .unwrap();

    let out = exec(&ctx, &["show"]).unwrap();
    assert_eq!(out["discount"], "10%");
    assert_eq!(out["session"]["coupon"]["type"], "percentage");
}
