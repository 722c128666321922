//! Closed enums for checkout-related values.
//!
//! Each enum has a fixed wire representation and a `FromStr` impl that
//! rejects anything outside the set, so string input from forms or the CLI
//! can never produce a value the rest of the system doesn't know about.

use serde::{Deserialize, Serialize};

/// Payment method selected for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentGateway {
    /// Pay the courier on delivery.
    CashOnDelivery,
    /// Card payment through Stripe.
    #[default]
    Stripe,
}

impl PaymentGateway {
    /// All supported gateways.
    pub const ALL: [Self; 2] = [Self::CashOnDelivery, Self::Stripe];

    /// Wire name of the gateway.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "CASH_ON_DELIVERY",
            Self::Stripe => "STRIPE",
        }
    }
}

impl std::fmt::Display for PaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentGateway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH_ON_DELIVERY" => Ok(Self::CashOnDelivery),
            "STRIPE" => Ok(Self::Stripe),
            _ => Err(format!("invalid payment gateway: {s}")),
        }
    }
}

/// How a coupon's amount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    /// Fixed amount off the order.
    #[default]
    Fixed,
    /// Percentage off the order.
    Percentage,
    /// Waives the shipping charge.
    FreeShipping,
}

impl std::fmt::Display for CouponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Percentage => write!(f, "percentage"),
            Self::FreeShipping => write!(f, "free_shipping"),
        }
    }
}

impl std::str::FromStr for CouponType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "percentage" => Ok(Self::Percentage),
            "free_shipping" => Ok(Self::FreeShipping),
            _ => Err(format!("invalid coupon type: {s}")),
        }
    }
}

/// Role of a customer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Billing,
    Shipping,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_gateway_default_is_stripe() {
        assert_eq!(PaymentGateway::default(), PaymentGateway::Stripe);
    }

    #[test]
    fn test_payment_gateway_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentGateway::CashOnDelivery).unwrap(),
            "\"CASH_ON_DELIVERY\""
        );
        for gateway in PaymentGateway::ALL {
            assert_eq!(gateway.as_str().parse::<PaymentGateway>(), Ok(gateway));
        }
    }

    #[test]
    fn test_payment_gateway_rejects_unknown() {
        assert!("BITCOIN".parse::<PaymentGateway>().is_err());
        assert!("stripe".parse::<PaymentGateway>().is_err());
        assert!(serde_json::from_str::<PaymentGateway>("\"BITCOIN\"").is_err());
    }

    #[test]
    fn test_coupon_type_round_trip_names() {
        for name in ["fixed", "percentage", "free_shipping"] {
            let parsed: CouponType = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
        assert!("bogus".parse::<CouponType>().is_err());
    }

    #[test]
    fn test_address_type_serde() {
        assert_eq!(
            serde_json::to_string(&AddressType::Shipping).unwrap(),
            "\"shipping\""
        );
    }
}
