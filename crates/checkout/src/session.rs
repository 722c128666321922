//! Checkout session record and the values it holds.
//!
//! [`CheckoutSession`] is an immutable value: every change produces a new
//! session through one of the `with_*` methods, leaving the original intact.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chawkbazar_core::{AddressId, AddressType, CouponId, CouponType, CustomerId, PaymentGateway};

/// Postal part of an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// A customer address chosen for billing or shipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    /// Label shown to the customer (e.g. "Home").
    pub title: String,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub address: UserAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
}

/// Delivery slot selected by the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Result of the last server-side checkout verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedResponse {
    pub total_tax: Decimal,
    pub shipping_charge: Decimal,
    /// Products that can no longer be ordered, as returned by the server.
    #[serde(default)]
    pub unavailable_products: Vec<serde_json::Value>,
}

impl VerifiedResponse {
    /// Tax plus shipping.
    #[must_use]
    pub fn total_charges(&self) -> Decimal {
        self.total_tax + self.shipping_charge
    }
}

/// A discount coupon applied to the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CouponId>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub coupon_type: CouponType,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Create a coupon with just a code, type and amount.
    pub fn new(code: impl Into<String>, coupon_type: CouponType, amount: Decimal) -> Self {
        Self {
            id: None,
            code: code.into(),
            description: None,
            coupon_type,
            amount,
            active_from: None,
            expire_at: None,
        }
    }
}

/// The in-progress checkout for a client.
///
/// Missing keys in stored data take their default, and unknown keys are
/// ignored, so older or newer stored records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckoutSession {
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub payment_gateway: PaymentGateway,
    pub delivery_time: Option<DeliveryTime>,
    pub customer_contact: String,
    pub verified_response: Option<VerifiedResponse>,
    pub coupon: Option<Coupon>,
    /// Verification token returned by the server.
    pub token: Option<String>,
}

impl CheckoutSession {
    #[must_use]
    pub fn with_billing_address(&self, billing_address: Option<Address>) -> Self {
        Self {
            billing_address,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_shipping_address(&self, shipping_address: Option<Address>) -> Self {
        Self {
            shipping_address,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_payment_gateway(&self, payment_gateway: PaymentGateway) -> Self {
        Self {
            payment_gateway,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_delivery_time(&self, delivery_time: Option<DeliveryTime>) -> Self {
        Self {
            delivery_time,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_customer_contact(&self, customer_contact: String) -> Self {
        Self {
            customer_contact,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_verified_response(&self, verified_response: Option<VerifiedResponse>) -> Self {
        Self {
            verified_response,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_coupon(&self, coupon: Option<Coupon>) -> Self {
        Self {
            coupon,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    /// Discount granted by the applied coupon, if any.
    #[must_use]
    pub fn discount(&self) -> Option<Decimal> {
        self.coupon.as_ref().map(|coupon| coupon.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_address(address_type: AddressType) -> Address {
        Address {
            id: Some(AddressId::new(1)),
            title: "Home".to_string(),
            address_type,
            address: UserAddress {
                street_address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
                country: "USA".to_string(),
            },
            customer_id: None,
        }
    }

    #[test]
    fn test_default_session() {
        let session = CheckoutSession::default();
        assert!(session.billing_address.is_none());
        assert!(session.shipping_address.is_none());
        assert!(session.delivery_time.is_none());
        assert!(session.verified_response.is_none());
        assert!(session.coupon.is_none());
        assert!(session.token.is_none());
        assert_eq!(session.customer_contact, "");
        assert_eq!(session.payment_gateway, PaymentGateway::Stripe);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let original = CheckoutSession::default();
        let updated = original.with_billing_address(Some(sample_address(AddressType::Billing)));

        assert!(original.billing_address.is_none());
        assert!(updated.billing_address.is_some());
        assert_eq!(
            updated.with_billing_address(None),
            original,
            "clearing the field should restore the default"
        );
    }

    #[test]
    fn test_discount_follows_coupon() {
        let session = CheckoutSession::default();
        assert_eq!(session.discount(), None);

        let session = session.with_coupon(Some(Coupon::new(
            "SAVE15",
            CouponType::Fixed,
            Decimal::new(15, 0),
        )));
        assert_eq!(session.discount(), Some(Decimal::new(15, 0)));

        assert_eq!(session.with_coupon(None).discount(), None);
    }

    #[test]
    fn test_deserialize_missing_and_unknown_keys() {
        let json = r#"{
            "customer_contact": "+15555550100",
            "payment_gateway": "CASH_ON_DELIVERY",
            "some_future_field": 1
        }"#;
        let session: CheckoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.customer_contact, "+15555550100");
        assert_eq!(session.payment_gateway, PaymentGateway::CashOnDelivery);
        assert!(session.coupon.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_gateway() {
        let json = r#"{ "payment_gateway": "BITCOIN" }"#;
        assert!(serde_json::from_str::<CheckoutSession>(json).is_err());
    }

    #[test]
    fn test_address_uses_type_key() {
        let value = serde_json::to_value(sample_address(AddressType::Shipping)).unwrap();
        assert_eq!(value["type"], "shipping");
        assert_eq!(value["address"]["city"], "Springfield");
    }

    #[test]
    fn test_verified_response_total_charges() {
        let resp: VerifiedResponse = serde_json::from_str(
            r#"{ "total_tax": "2.50", "shipping_charge": "5.00", "unavailable_products": [] }"#,
        )
        .unwrap();
        assert_eq!(resp.total_charges(), Decimal::new(750, 2));
    }
}
