//! Typed resource models and the response decoder
//!
//! Models are only ever produced by decoding an API response. Unknown fields
//! are ignored, absent optional fields become `None`, and monetary amounts
//! are accepted either as integers or as integer strings.

mod de;

pub mod customer;
pub mod charge;
pub mod list;
pub mod refund;
pub mod source;
pub mod token;

pub use charge::{Charge, ChargeStatus};
pub use customer::{Customer, DeletedObject};
pub use list::List;
pub use refund::{Refund, RefundReason, RefundStatus};
pub use source::{AccountHolderType, Address, BankAccount, Card, PaymentSource, Shipping};
pub use token::{Token, TokenType};

use crate::error::ApiResult;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Free-form key/value pairs attached to an object
pub type Metadata = BTreeMap<String, String>;

/// Decode a successful response body into `M`
///
/// # Errors
///
/// Returns [`crate::ApiError::Decoding`] if the body is not valid JSON or a
/// required field is missing or has the wrong type.
pub fn decode<M: DeserializeOwned>(body: &[u8]) -> ApiResult<M> {
    Ok(serde_json::from_slice(body)?)
}
