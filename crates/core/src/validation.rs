//! Parameter validation for request builders
//!
//! Every route builder runs its inputs through a [`Validator`] before any
//! request is assembled, so constraint violations surface locally without a
//! network round trip.
//!
//! # Example
//!
//! ```rust
//! use stripe_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .identifier("charge", "ch_1")
//!     .range("exp_month", 13, 1, 12)
//!     .finish();
//!
//! let err = result.unwrap_err();
//! assert_eq!(err.first_field(), Some("exp_month"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length of an object identifier
pub const MAX_IDENTIFIER_LEN: usize = 255;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("identifier pattern is valid"));

static COUNTRY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("country pattern is valid"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Parameter that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Machine-readable code
    pub code: String,
    /// Offending value, when it is safe to echo
    pub actual: Option<String>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One or more parameters violated a documented constraint
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid parameters: {}", join(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Build an error for a single field
    pub fn field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.into(),
                code: code.to_string(),
                actual: None,
            }],
        }
    }

    /// All failed constraints, in the order they were checked
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Name of the first offending parameter
    #[must_use]
    pub fn first_field(&self) -> Option<&str> {
        self.errors.first().map(|e| e.field.as_str())
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, code: &str, message: String, actual: Option<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            actual,
        });
    }

    /// Validate that a field is not blank
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field, "REQUIRED", "Field is required".to_string(), None);
        }
        self
    }

    /// Validate an object identifier that will be embedded in a path or body
    ///
    /// Identifiers must be non-empty, at most [`MAX_IDENTIFIER_LEN`] characters,
    /// and made of ASCII letters, digits, `_` and `-`.
    #[must_use]
    pub fn identifier(mut self, field: &str, value: &str) -> Self {
        if value.is_empty() {
            self.fail(field, "REQUIRED", "Identifier is required".to_string(), None);
        } else if value.len() > MAX_IDENTIFIER_LEN {
            self.fail(
                field,
                "MAX_LENGTH",
                format!("Identifier must be at most {MAX_IDENTIFIER_LEN} characters"),
                None,
            );
        } else if !IDENTIFIER.is_match(value) {
            self.fail(
                field,
                "MALFORMED_IDENTIFIER",
                "Identifier may only contain letters, digits, '_' and '-'".to_string(),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate an optional identifier; `None` always passes
    #[must_use]
    pub fn optional_identifier(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.identifier(field, v),
            None => self,
        }
    }

    /// Validate maximum length
    #[must_use]
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.fail(
                field,
                "MAX_LENGTH",
                format!("Must be at most {max} characters"),
                Some(format!("{len} chars")),
            );
        }
        self
    }

    /// Validate a numeric range (inclusive)
    #[must_use]
    pub fn range<T: PartialOrd + fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.fail(
                field,
                "RANGE",
                format!("Must be between {min} and {max}"),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate a strictly positive amount in minor currency units
    #[must_use]
    pub fn positive(mut self, field: &str, value: i64) -> Self {
        if value <= 0 {
            self.fail(
                field,
                "NOT_POSITIVE",
                "Must be a positive integer".to_string(),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate that a value consists of ASCII digits with a length in `min..=max`
    ///
    /// The value is never echoed back since it is usually a card or account number.
    #[must_use]
    pub fn digits(mut self, field: &str, value: &str, min: usize, max: usize) -> Self {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            self.fail(field, "NOT_DIGITS", "Must contain only digits".to_string(), None);
        } else if value.len() < min || value.len() > max {
            self.fail(
                field,
                "LENGTH",
                format!("Must be between {min} and {max} digits"),
                Some(format!("{} digits", value.len())),
            );
        }
        self
    }

    /// Validate a two-letter ISO 3166-1 alpha-2 country code
    #[must_use]
    pub fn country_code(mut self, field: &str, value: &str) -> Self {
        if !COUNTRY_CODE.is_match(value) {
            self.fail(
                field,
                "COUNTRY_CODE",
                "Must be a two-letter uppercase ISO country code".to_string(),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate an optional email address
    #[must_use]
    pub fn email(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            if !EMAIL.is_match(v) {
                self.fail(
                    field,
                    "EMAIL",
                    "Must be a valid email address".to_string(),
                    Some(v.to_string()),
                );
            }
        }
        self
    }

    /// Add a custom check; the closure returns a message on failure
    #[must_use]
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.fail(field, "CUSTOM", message, None);
        }
        self
    }

    /// Complete validation
    ///
    /// # Errors
    ///
    /// Returns every failed constraint collected so far.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifier() {
        assert!(Validator::new().identifier("charge", "ch_1AbC").finish().is_ok());
        assert!(Validator::new().identifier("token", "tok_visa").finish().is_ok());
    }

    #[test]
    fn test_malformed_identifier() {
        for bad in ["", "ch 1", "ch_1/../x", "ch_1?x=y", "ré_1"] {
            let err = Validator::new().identifier("charge", bad).finish().unwrap_err();
            assert_eq!(err.first_field(), Some("charge"), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_range_validation() {
        let err = Validator::new().range("exp_month", 0, 1, 12).finish().unwrap_err();
        assert_eq!(err.errors()[0].code, "RANGE");
        assert!(Validator::new().range("exp_month", 12, 1, 12).finish().is_ok());
    }

    #[test]
    fn test_digits_hides_value() {
        let err = Validator::new()
            .digits("card[number]", "4242abcd", 12, 19)
            .finish()
            .unwrap_err();
        assert_eq!(err.errors()[0].code, "NOT_DIGITS");
        assert!(err.errors()[0].actual.is_none());
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let err = Validator::new()
            .positive("amount", 0)
            .country_code("country", "usa")
            .email("email", Some("nope"))
            .finish()
            .unwrap_err();

        let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["amount", "country", "email"]);
        assert!(err.to_string().starts_with("invalid parameters: amount"));
    }

    #[test]
    fn test_optional_values_pass_when_unset() {
        assert!(Validator::new()
            .optional_identifier("customer", None)
            .email("email", None)
            .finish()
            .is_ok());
    }
}
