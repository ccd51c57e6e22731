//! Supported settlement and presentment currencies
//!
//! Codes are the lowercase ISO 4217 strings the API uses on the wire.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// ISO 4217 currency accepted by the payment API
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Currency {
    /// UAE dirham
    Aed,
    /// Argentine peso
    Ars,
    /// Australian dollar
    Aud,
    /// Bulgarian lev
    Bgn,
    /// Brazilian real
    Brl,
    /// Canadian dollar
    Cad,
    /// Swiss franc
    Chf,
    /// Chilean peso
    Clp,
    /// Chinese yuan
    Cny,
    /// Colombian peso
    Cop,
    /// Czech koruna
    Czk,
    /// Danish krone
    Dkk,
    /// Euro
    Eur,
    /// Pound sterling
    Gbp,
    /// Hong Kong dollar
    Hkd,
    /// Hungarian forint
    Huf,
    /// Indonesian rupiah
    Idr,
    /// Israeli new shekel
    Ils,
    /// Indian rupee
    Inr,
    /// Icelandic krona
    Isk,
    /// Japanese yen
    Jpy,
    /// South Korean won
    Krw,
    /// Mexican peso
    Mxn,
    /// Malaysian ringgit
    Myr,
    /// Norwegian krone
    Nok,
    /// New Zealand dollar
    Nzd,
    /// Philippine peso
    Php,
    /// Polish zloty
    Pln,
    /// Romanian leu
    Ron,
    /// Russian ruble
    Rub,
    /// Saudi riyal
    Sar,
    /// Swedish krona
    Sek,
    /// Singapore dollar
    Sgd,
    /// Thai baht
    Thb,
    /// Turkish lira
    Try,
    /// New Taiwan dollar
    Twd,
    /// Ukrainian hryvnia
    Uah,
    /// US dollar
    Usd,
    /// Vietnamese dong
    Vnd,
    /// South African rand
    Zar,
}

impl Currency {
    /// Wire code, e.g. `"usd"`
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Whether amounts in this currency have no minor unit
    ///
    /// For these currencies `amount: 500` means 500 whole units.
    #[must_use]
    pub fn is_zero_decimal(self) -> bool {
        matches!(
            self,
            Self::Clp | Self::Isk | Self::Jpy | Self::Krw | Self::Vnd
        )
    }
}
