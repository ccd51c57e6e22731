//! Payment sources: cards, bank accounts and shipping details

use super::{de, Metadata};
use crate::error::{ApiError, ApiResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use stripe_core::Currency;

/// A payment card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Card {
    /// Identifier, e.g. `card_...`
    pub id: String,
    /// Card brand, e.g. `Visa`
    pub brand: String,
    /// Last four digits
    pub last4: String,
    /// Expiration month (1-12)
    pub exp_month: u32,
    /// Four-digit expiration year
    pub exp_year: u32,
    /// `credit`, `debit`, `prepaid` or `unknown`
    pub funding: Option<String>,
    /// Issuing country (ISO 3166-1 alpha-2)
    pub country: Option<String>,
    /// Cardholder name
    pub name: Option<String>,
    /// Result of the CVC check
    pub cvc_check: Option<String>,
    /// Stable fingerprint across tokens of the same card
    pub fingerprint: Option<String>,
    /// Owning customer, if attached
    pub customer: Option<String>,
    /// Transfer currency for debit cards on connected accounts
    #[serde(default, deserialize_with = "de::option_currency")]
    pub currency: Option<Currency>,
    /// Billing address, first line
    pub address_line1: Option<String>,
    /// Billing city
    pub address_city: Option<String>,
    /// Billing postal code
    pub address_zip: Option<String>,
    /// Billing country
    pub address_country: Option<String>,
    /// Attached metadata
    pub metadata: Option<Metadata>,
}

/// Entity that holds a bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccountHolderType {
    /// A person
    Individual,
    /// A business
    Company,
}

/// A bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BankAccount {
    /// Identifier, e.g. `ba_...`
    pub id: String,
    /// Last four digits of the account number
    pub last4: String,
    /// Country the bank is in (ISO 3166-1 alpha-2)
    pub country: String,
    /// Account currency
    pub currency: Currency,
    /// Name of the account holder
    pub account_holder_name: Option<String>,
    /// Individual or company
    pub account_holder_type: Option<AccountHolderType>,
    /// Name of the bank
    pub bank_name: Option<String>,
    /// Routing number, sort code or equivalent
    pub routing_number: Option<String>,
    /// `new`, `validated`, `verified`, `verification_failed` or `errored`
    pub status: Option<String>,
    /// Stable fingerprint across tokens of the same account
    pub fingerprint: Option<String>,
    /// Owning customer, if attached
    pub customer: Option<String>,
    /// Attached metadata
    pub metadata: Option<Metadata>,
}

/// A source attached to a charge or customer
///
/// The API discriminates sources with their `object` field. Types this client
/// does not model decode to [`PaymentSource::Unsupported`] so the surrounding
/// object still decodes; asking for a typed view of one fails with
/// [`ApiError::UnsupportedSourceType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PaymentSource {
    /// `object: "card"`
    Card(Card),
    /// `object: "bank_account"`
    BankAccount(BankAccount),
    /// Any other `object`
    Unsupported {
        /// The unrecognised discriminator
        object: String,
    },
}

impl<'de> Deserialize<'de> for PaymentSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let object = value
            .get("object")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("object"))?
            .to_string();

        match object.as_str() {
            "card" => serde_json::from_value(value)
                .map(Self::Card)
                .map_err(D::Error::custom),
            "bank_account" => serde_json::from_value(value)
                .map(Self::BankAccount)
                .map_err(D::Error::custom),
            _ => Ok(Self::Unsupported { object }),
        }
    }
}

impl PaymentSource {
    /// Source identifier, when the type is supported
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Card(card) => Some(&card.id),
            Self::BankAccount(account) => Some(&account.id),
            Self::Unsupported { .. } => None,
        }
    }

    /// Typed card view
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnsupportedSourceType`] if this source is not a card.
    pub fn as_card(&self) -> ApiResult<&Card> {
        match self {
            Self::Card(card) => Ok(card),
            other => Err(other.unsupported()),
        }
    }

    /// Typed bank account view
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnsupportedSourceType`] if this source is not a bank account.
    pub fn as_bank_account(&self) -> ApiResult<&BankAccount> {
        match self {
            Self::BankAccount(account) => Ok(account),
            other => Err(other.unsupported()),
        }
    }

    fn unsupported(&self) -> ApiError {
        let object = match self {
            Self::Card(_) => "card",
            Self::BankAccount(_) => "bank_account",
            Self::Unsupported { object } => object.as_str(),
        };
        ApiError::UnsupportedSourceType {
            object: object.to_string(),
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Address {
    /// Street address
    pub line1: Option<String>,
    /// Apartment, suite or building
    pub line2: Option<String>,
    /// City or locality
    pub city: Option<String>,
    /// State, county or province
    pub state: Option<String>,
    /// ZIP or postal code
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2
    pub country: Option<String>,
}

/// Shipping details recorded on a charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Shipping {
    /// Recipient name
    pub name: String,
    /// Recipient address
    pub address: Option<Address>,
    /// Recipient phone number
    pub phone: Option<String>,
    /// Delivery service
    pub carrier: Option<String>,
    /// Carrier tracking number
    pub tracking_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode;

    const CARD: &[u8] = br#"{
        "id": "card_1",
        "object": "card",
        "brand": "Visa",
        "last4": "4242",
        "exp_month": 10,
        "exp_year": 2018,
        "funding": "credit",
        "cvc_check": "pass"
    }"#;

    #[test]
    fn test_card_source() {
        let source: PaymentSource = decode(CARD).unwrap();
        let card = source.as_card().unwrap();
        assert_eq!(card.last4, "4242");
        assert_eq!(card.name, None);
        assert_eq!(source.id(), Some("card_1"));
        assert!(matches!(
            source.as_bank_account(),
            Err(ApiError::UnsupportedSourceType { ref object }) if object == "card"
        ));
    }

    #[test]
    fn test_bank_account_source() {
        let json = br#"{
            "id": "ba_1",
            "object": "bank_account",
            "last4": "6789",
            "country": "US",
            "currency": "usd",
            "account_holder_type": "company"
        }"#;
        let source: PaymentSource = decode(json).unwrap();
        let account = source.as_bank_account().unwrap();
        assert_eq!(account.currency, Currency::Usd);
        assert_eq!(account.account_holder_type, Some(AccountHolderType::Company));
    }

    #[test]
    fn test_unknown_source_is_unsupported() {
        let json = br#"{"id": "src_1", "object": "source", "type": "sofort"}"#;
        let source: PaymentSource = decode(json).unwrap();
        assert_eq!(source.id(), None);
        let err = source.as_card().unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedSourceType { ref object } if object == "source"));
        assert_eq!(err.to_string(), "unsupported payment source type: source");
    }

    #[test]
    fn test_card_with_unmodelled_currency() {
        let json = br#"{"id": "card_1", "object": "card", "brand": "Visa", "last4": "4242", "exp_month": 1, "exp_year": 2030, "currency": "mad"}"#;
        let source: PaymentSource = decode(json).unwrap();
        assert_eq!(source.as_card().unwrap().currency, None);
    }

    #[test]
    fn test_source_without_object_fails() {
        let result: ApiResult<PaymentSource> = decode(br#"{"id": "card_1"}"#);
        assert!(matches!(result, Err(ApiError::Decoding(_))));
    }

    #[test]
    fn test_broken_card_fails() {
        let json = br#"{"id": "card_1", "object": "card", "brand": "Visa"}"#;
        let result: ApiResult<PaymentSource> = decode(json);
        assert!(matches!(result, Err(ApiError::Decoding(_))));
    }
}
