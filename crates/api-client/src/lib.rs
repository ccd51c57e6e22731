//! Typed client for the Stripe payments API
//!
//! Requests are built by pure, per-resource route builders, dispatched once
//! through an injected [`Transport`], and decoded into typed models.
//!
//! # Features
//!
//! - **Typed route builders**: parameters are validated and normalized before
//!   anything is sent; optional parameters are omitted, never sent empty
//! - **Form encoding**: bodies use the API's bracketed key convention
//!   (`card[number]`, `metadata[key]`)
//! - **Pluggable transport**: `reqwest` by default, any [`Transport`] in tests
//! - **Closed error taxonomy**: every failure is one [`ApiError`] kind
//! - **Request correlation**: every dispatch runs in a `tracing` span with a
//!   unique id
//!
//! # Example
//!
//! ```rust,no_run
//! use stripe_api_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads STRIPE_SECRET_KEY and friends
//!     let client = StripeClient::new()?;
//!
//!     let token = client
//!         .tokens()
//!         .create_card_token("4242 4242 4242 4242", 10, 2030, "123", &CardTokenParams::default())?
//!         .send(&client)
//!         .await?;
//!
//!     let refund = client
//!         .refunds()
//!         .create("ch_1", &CreateRefundParams {
//!             amount: Some(500),
//!             reason: Some(RefundReason::RequestedByCustomer),
//!             ..CreateRefundParams::default()
//!         })?
//!         .send(&client)
//!         .await?;
//!
//!     println!("{} {}", token.id, refund.id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod request;
pub mod transport;

pub use client::StripeClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult, ErrorDetails};
pub use request::{Method, Route, StripeRequest};
pub use transport::{HttpRequest, HttpTransport, Transport, TransportError, TransportResponse};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::StripeClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{
        BankAccountTokenParams, CaptureChargeParams, CardTokenParams, CreateChargeParams,
        CreateRefundParams, CustomerParams, ListParams, UpdateChargeParams,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::{Charge, Customer, List, Metadata, Refund, RefundReason, Token};
    pub use stripe_core::Currency;
}
