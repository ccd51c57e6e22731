//! Lenient deserializers for vendor quirks

use serde::{Deserialize, Deserializer};
use stripe_core::Currency;

/// Amounts are integers in minor units but occasionally arrive as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_amount<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Int(n) => Ok(n),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid amount: {s:?}"))),
        }
    }
}

pub(crate) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    IntOrString::deserialize(deserializer)?.into_amount()
}

pub(crate) fn option_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<IntOrString>::deserialize(deserializer)?
        .map(IntOrString::into_amount)
        .transpose()
}

/// Optional currencies tolerate codes this client does not know; they become `None`
pub(crate) fn option_currency<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Currency>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|code| code.parse().ok()))
}
