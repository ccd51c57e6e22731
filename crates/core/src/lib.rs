//! Shared primitives for the Stripe client workspace
//!
//! This crate holds the pieces that every route builder and tool agrees on:
//!
//! - **Validation**: fluent parameter checks that fail before any I/O
//! - **Normalization**: canonical form for card and bank account numbers
//! - **Currencies**: the closed set of ISO 4217 codes the API accepts
//!
//! # Example
//!
//! ```rust
//! use stripe_core::{clean_number, Currency, Validator};
//!
//! let number = clean_number("4242 4242-4242 4242");
//! Validator::new()
//!     .digits("card[number]", &number, 12, 19)
//!     .finish()
//!     .expect("valid card number");
//!
//! assert_eq!(number, "4242424242424242");
//! assert_eq!(Currency::Usd.code(), "usd");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod currency;
pub mod normalize;
pub mod validation;

pub use currency::Currency;
pub use normalize::clean_number;
pub use validation::{FieldError, ValidationError, Validator};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::currency::Currency;
    pub use crate::normalize::clean_number;
    pub use crate::validation::{FieldError, ValidationError, Validator};
}
