//! Refunds

use super::{de, Metadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use stripe_core::Currency;

/// Why a refund was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefundReason {
    /// The charge was made twice
    Duplicate,
    /// The charge was fraudulent
    Fraudulent,
    /// The customer asked for their money back
    RequestedByCustomer,
    /// Set by the API when an uncaptured charge expires
    ExpiredUncapturedCharge,
    /// A reason this client does not model
    #[serde(other)]
    Unknown,
}

/// Refund lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefundStatus {
    /// Not yet settled
    Pending,
    /// Funds returned
    Succeeded,
    /// The refund could not be processed
    Failed,
    /// The refund was canceled
    Canceled,
    /// A status this client does not model
    #[serde(other)]
    Unknown,
}

/// A refund of a previously created charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Refund {
    /// Identifier, e.g. `re_...`
    pub id: String,
    /// Amount refunded, in minor currency units
    #[serde(deserialize_with = "de::amount")]
    pub amount: i64,
    /// Refund currency; `None` when absent or not modelled
    #[serde(default, deserialize_with = "de::option_currency")]
    pub currency: Option<Currency>,
    /// Refunded charge
    pub charge: Option<String>,
    /// Why the refund was issued
    pub reason: Option<RefundReason>,
    /// Lifecycle state
    pub status: Option<RefundStatus>,
    /// Creation time
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    /// Balance transaction identifier
    pub balance_transaction: Option<String>,
    /// Number shown on the refund receipt
    pub receipt_number: Option<String>,
    /// Attached metadata
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode;
    use std::str::FromStr;

    #[test]
    fn test_minimal_refund() {
        let refund: Refund =
            decode(br#"{"id":"re_1","amount":500,"reason":"requested_by_customer"}"#).unwrap();
        assert_eq!(refund.amount, 500);
        assert_eq!(refund.reason, Some(RefundReason::RequestedByCustomer));
        assert_eq!(refund.currency, None);
        assert_eq!(refund.metadata, None);
    }

    #[test]
    fn test_full_refund() {
        let json = br#"{
            "id": "re_1",
            "object": "refund",
            "amount": 500,
            "balance_transaction": "txn_1",
            "charge": "ch_1",
            "created": 1494700000,
            "currency": "usd",
            "metadata": {"hello": "world"},
            "reason": null,
            "receipt_number": null,
            "status": "succeeded"
        }"#;

        let refund: Refund = decode(json).unwrap();
        assert_eq!(refund.charge.as_deref(), Some("ch_1"));
        assert_eq!(refund.currency, Some(Currency::Usd));
        assert_eq!(refund.status, Some(RefundStatus::Succeeded));
        assert_eq!(refund.reason, None);
        assert_eq!(
            refund.metadata.unwrap().get("hello").map(String::as_str),
            Some("world")
        );
    }

    #[test]
    fn test_zero_amount_is_not_unset() {
        let refund: Refund = decode(br#"{"id":"re_1","amount":0}"#).unwrap();
        assert_eq!(refund.amount, 0);
    }

    #[test]
    fn test_missing_amount_fails() {
        assert!(decode::<Refund>(br#"{"id":"re_1"}"#).is_err());
        assert!(decode::<Refund>(br#"{"id":7,"amount":1}"#).is_err());
    }

    #[test]
    fn test_unmodelled_values_leave_refund_decodable() {
        let refund: Refund = decode(
            br#"{"id":"re_1","amount":500,"status":"requires_action","currency":"mad","reason":"chargeback"}"#,
        )
        .unwrap();
        assert_eq!(refund.amount, 500);
        assert_eq!(refund.status, Some(RefundStatus::Unknown));
        assert_eq!(refund.reason, Some(RefundReason::Unknown));
        assert_eq!(refund.currency, None);
        assert_eq!(RefundStatus::Succeeded.to_string(), "succeeded");
    }

    #[test]
    fn test_reason_parse() {
        assert_eq!(
            RefundReason::from_str("requested_by_customer").unwrap(),
            RefundReason::RequestedByCustomer
        );
        assert_eq!(RefundReason::Fraudulent.to_string(), "fraudulent");
    }
}
