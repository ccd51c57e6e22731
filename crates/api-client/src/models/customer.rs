//! Customers

use super::{de, List, Metadata, PaymentSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stripe_core::Currency;

/// A customer with stored payment sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Customer {
    /// Identifier, e.g. `cus_...`
    pub id: String,
    /// Contact email
    pub email: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Balance applied to the next invoice, in minor units
    #[serde(default, deserialize_with = "de::option_amount")]
    pub account_balance: Option<i64>,
    /// Currency of the balance; `None` when absent or not modelled
    #[serde(default, deserialize_with = "de::option_currency")]
    pub currency: Option<Currency>,
    /// Identifier of the default source
    pub default_source: Option<String>,
    /// Whether the latest charge or invoice failed
    pub delinquent: Option<bool>,
    /// Creation time
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    /// Whether the customer exists in live mode
    pub livemode: Option<bool>,
    /// Attached metadata
    pub metadata: Option<Metadata>,
    /// Stored payment sources
    pub sources: Option<List<PaymentSource>>,
}

impl Customer {
    /// The default source, if it is present in the embedded source list
    #[must_use]
    pub fn default_payment_source(&self) -> Option<&PaymentSource> {
        let default = self.default_source.as_deref()?;
        self.sources
            .as_ref()?
            .items
            .iter()
            .find(|source| source.id() == Some(default))
    }
}

/// Acknowledgement of a deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct DeletedObject {
    /// Identifier of the deleted object
    pub id: String,
    /// Always `true` on success
    pub deleted: bool,
}
