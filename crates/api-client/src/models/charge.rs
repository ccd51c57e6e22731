//! Charges

use super::{de, List, Metadata, PaymentSource, Refund, Shipping};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use stripe_core::Currency;

/// Outcome of a charge attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChargeStatus {
    /// The charge went through
    Succeeded,
    /// Awaiting an asynchronous result
    Pending,
    /// The charge was declined or errored
    Failed,
    /// A status this client does not model
    #[serde(other)]
    Unknown,
}

/// A charge against a card or other payment source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Charge {
    /// Identifier, e.g. `ch_...`
    pub id: String,
    /// Amount charged, in minor currency units
    #[serde(deserialize_with = "de::amount")]
    pub amount: i64,
    /// Charge currency
    pub currency: Currency,
    /// Amount refunded so far
    #[serde(default, deserialize_with = "de::option_amount")]
    pub amount_refunded: Option<i64>,
    /// `false` while only authorized
    pub captured: Option<bool>,
    /// Whether the charge succeeded or was authorized
    pub paid: Option<bool>,
    /// Whether the full amount has been refunded
    pub refunded: Option<bool>,
    /// Outcome
    pub status: Option<ChargeStatus>,
    /// Free-form description
    pub description: Option<String>,
    /// Charged customer
    pub customer: Option<String>,
    /// Machine-readable failure reason
    pub failure_code: Option<String>,
    /// Human-readable failure reason
    pub failure_message: Option<String>,
    /// Address the receipt was sent to
    pub receipt_email: Option<String>,
    /// Text on the customer's statement
    pub statement_descriptor: Option<String>,
    /// Groups this charge with related transfers
    pub transfer_group: Option<String>,
    /// Account the charge was made on behalf of
    pub on_behalf_of: Option<String>,
    /// Application fee identifier
    pub application_fee: Option<String>,
    /// Balance transaction identifier
    pub balance_transaction: Option<String>,
    /// Creation time
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    /// Whether the charge exists in live mode
    pub livemode: Option<bool>,
    /// Attached metadata
    pub metadata: Option<Metadata>,
    /// Refunds issued against this charge
    pub refunds: Option<List<Refund>>,
    /// Source that was charged
    pub source: Option<PaymentSource>,
    /// Shipping details
    pub shipping: Option<Shipping>,
}

impl Charge {
    /// Amount that can still be refunded
    #[must_use]
    pub fn refundable(&self) -> i64 {
        self.amount.saturating_sub(self.amount_refunded.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode;

    const CHARGE: &[u8] = br#"{
        "id": "ch_1",
        "object": "charge",
        "amount": 1000,
        "amount_refunded": 500,
        "captured": true,
        "currency": "usd",
        "description": "Vapor Stripe: Test Description",
        "paid": true,
        "refunded": false,
        "status": "succeeded",
        "created": 1494700000,
        "livemode": false,
        "metadata": {},
        "refunds": {
            "object": "list",
            "data": [{"id": "re_1", "amount": 500, "charge": "ch_1"}],
            "has_more": false,
            "total_count": 1,
            "url": "/v1/charges/ch_1/refunds"
        },
        "source": {
            "id": "card_1",
            "object": "card",
            "brand": "Visa",
            "last4": "4242",
            "exp_month": 10,
            "exp_year": 2018
        },
        "shipping": {
            "name": "Jane Doe",
            "address": {"line1": "1 Main St", "city": "Springfield", "country": "US"}
        },
        "outcome": {"network_status": "approved_by_network"}
    }"#;

    #[test]
    fn test_decode_charge() {
        let charge: Charge = decode(CHARGE).unwrap();
        assert_eq!(charge.amount, 1000);
        assert_eq!(charge.refundable(), 500);
        assert_eq!(charge.status, Some(ChargeStatus::Succeeded));
        assert_eq!(charge.refunds.as_ref().unwrap().items[0].id, "re_1");
        assert_eq!(charge.source.as_ref().unwrap().as_card().unwrap().last4, "4242");
        assert_eq!(
            charge.shipping.unwrap().address.unwrap().city.as_deref(),
            Some("Springfield")
        );
        assert_eq!(charge.metadata, Some(Metadata::new()));
    }

    #[test]
    fn test_unsupported_source_still_decodes() {
        let json = br#"{"id": "ch_2", "amount": 100, "currency": "eur", "source": {"object": "alipay_account", "id": "aliacc_1"}}"#;
        let charge: Charge = decode(json).unwrap();
        assert!(charge.source.as_ref().unwrap().as_card().is_err());
        assert_eq!(charge.amount_refunded, None);
        assert_eq!(charge.refundable(), 100);
    }

    #[test]
    fn test_unknown_status_still_decodes() {
        let json = br#"{"id": "ch_4", "amount": 100, "currency": "usd", "status": "requires_review"}"#;
        let charge: Charge = decode(json).unwrap();
        assert_eq!(charge.status, Some(ChargeStatus::Unknown));
        assert_eq!(ChargeStatus::Succeeded.to_string(), "succeeded");
    }

    #[test]
    fn test_refundable_saturates() {
        let json = br#"{"id": "ch_5", "amount": "-9223372036854775808", "currency": "usd", "amount_refunded": 1}"#;
        let charge: Charge = decode(json).unwrap();
        assert_eq!(charge.refundable(), i64::MIN);
    }

    #[test]
    fn test_unknown_currency_fails() {
        let json = br#"{"id": "ch_3", "amount": 100, "currency": "zzz"}"#;
        assert!(decode::<Charge>(json).is_err());
    }
}
