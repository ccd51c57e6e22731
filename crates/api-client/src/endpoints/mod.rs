//! Route builders, one namespace per resource
//!
//! Builders are pure: they validate and normalize their inputs and return a
//! [`StripeRequest`](crate::request::StripeRequest) typed by the model its
//! response decodes into. Nothing here performs I/O.
//!
//! | Module | Routes | Model |
//! |--------|--------|-------|
//! | `tokens` | `/v1/tokens` | [`Token`](crate::models::Token) |
//! | `charges` | `/v1/charges`, `/v1/charges/{id}/capture` | [`Charge`](crate::models::Charge) |
//! | `refunds` | `/v1/refunds` | [`Refund`](crate::models::Refund) |
//! | `customers` | `/v1/customers` | [`Customer`](crate::models::Customer) |

pub mod charges;
pub mod customers;
pub mod params;
pub mod refunds;
pub mod tokens;

pub use charges::{
    CaptureChargeParams, ChargeRoutes, CreateChargeParams, FraudReport, ShippingAddress,
    ShippingParams, UpdateChargeParams,
};
pub use customers::{CustomerParams, CustomerRoutes};
pub use params::{CreatedFilter, ListParams};
pub use refunds::{CreateRefundParams, RefundRoutes};
pub use tokens::{BankAccountTokenParams, CardTokenParams, TokenRoutes};
