//! Single-use tokens

use super::source::{BankAccount, Card};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// What a token wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TokenType {
    /// Card details
    Card,
    /// Bank account details
    BankAccount,
    /// Personally identifiable information
    Pii,
    /// Connected account details
    Account,
    /// A token type this client does not model
    #[serde(other)]
    Unknown,
}

/// A single-use token standing in for sensitive details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Token {
    /// Identifier, e.g. `tok_...`
    pub id: String,
    /// Token kind
    #[serde(rename = "type")]
    pub kind: TokenType,
    /// IP address the token was created from
    pub client_ip: Option<String>,
    /// Creation time
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    /// Whether the token exists in live mode
    pub livemode: Option<bool>,
    /// Whether the token has been consumed
    pub used: Option<bool>,
    /// Wrapped card, for card tokens
    pub card: Option<Card>,
    /// Wrapped bank account, for bank account tokens
    pub bank_account: Option<BankAccount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode;
    use chrono::TimeZone;

    #[test]
    fn test_card_token() {
        let json = br#"{
            "id": "tok_1",
            "object": "token",
            "type": "card",
            "client_ip": null,
            "created": 1494621000,
            "livemode": false,
            "used": false,
            "card": {
                "id": "card_1",
                "object": "card",
                "brand": "Visa",
                "last4": "4242",
                "exp_month": 10,
                "exp_year": 2018,
                "name": "Test Card"
            }
        }"#;

        let token: Token = decode(json).unwrap();
        assert_eq!(token.kind, TokenType::Card);
        assert_eq!(token.client_ip, None);
        assert_eq!(
            token.created,
            Some(Utc.timestamp_opt(1_494_621_000, 0).unwrap())
        );
        assert_eq!(token.card.unwrap().name.as_deref(), Some("Test Card"));
        assert!(token.bank_account.is_none());
    }

    #[test]
    fn test_pii_token_is_minimal() {
        let token: Token = decode(br#"{"id": "pii_1", "type": "pii"}"#).unwrap();
        assert_eq!(token.kind, TokenType::Pii);
        assert_eq!(token.used, None);
        assert_eq!(token.created, None);
    }

    #[test]
    fn test_token_type_names() {
        assert_eq!(TokenType::BankAccount.to_string(), "bank_account");
        let token: Token = decode(br#"{"id": "cvctok_1", "type": "cvc_update"}"#).unwrap();
        assert_eq!(token.kind, TokenType::Unknown);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let plain: Token = decode(br#"{"id": "tok_1", "type": "card", "used": true}"#).unwrap();
        let noisy: Token = decode(
            br#"{"id": "tok_1", "type": "card", "used": true, "redaction": null, "extra": {"a": [1, 2]}}"#,
        )
        .unwrap();
        assert_eq!(plain, noisy);
    }
}
