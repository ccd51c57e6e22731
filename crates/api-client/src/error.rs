//! Error types for the API client
//!
//! [`ApiError`] is a closed taxonomy. Builders only ever produce
//! [`ApiError::Validation`]; every other kind comes back from the dispatcher
//! after a round trip and is handed to the caller unchanged.

use crate::transport::TransportError;
use serde::{Deserialize, Serialize};
use stripe_core::ValidationError;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Structured detail reported by the API alongside a failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Human-readable message from the API
    pub message: String,
    /// Machine-readable error code, e.g. `card_declined`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Parameter the error relates to, e.g. `card[number]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Issuer decline reason for card errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_code: Option<String>,
}

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("connection failed: {0}")]
    Connection(#[from] TransportError),

    /// The API rejected the request as malformed
    #[error("malformed request ({status}): {}", details.message)]
    MalformedRequest {
        /// HTTP status code
        status: u16,
        /// Upstream detail
        details: ErrorDetails,
    },

    /// The secret key was missing, invalid or revoked
    #[error("authentication failed ({status}): {}", details.message)]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Upstream detail
        details: ErrorDetails,
    },

    /// The card or payment source could not be charged
    #[error("card error ({status}): {}", details.message)]
    Card {
        /// HTTP status code
        status: u16,
        /// Upstream detail
        details: ErrorDetails,
    },

    /// The request had invalid parameters or referenced a missing object
    #[error("invalid request ({status}): {}", details.message)]
    InvalidRequest {
        /// HTTP status code
        status: u16,
        /// Upstream detail
        details: ErrorDetails,
    },

    /// Too many requests hit the API too quickly
    #[error("rate limited ({status}): {}", details.message)]
    RateLimit {
        /// HTTP status code
        status: u16,
        /// Upstream detail
        details: ErrorDetails,
    },

    /// A parameter failed local validation; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A payment source had a type this client does not model
    #[error("unsupported payment source type: {object}")]
    UnsupportedSourceType {
        /// The `object` discriminator the API returned
        object: String,
    },

    /// Any other API failure, including unmapped statuses
    #[error("API error ({status}): {}", details.message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Upstream detail
        details: ErrorDetails,
    },

    /// A successful response did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    /// Client configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),
}

/// Error envelope returned by the API: `{"error": {...}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: WireError,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
    code: Option<String>,
    param: Option<String>,
    decline_code: Option<String>,
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Classify a non-success response
    ///
    /// The error body's `type` decides when it names a known kind. Without one
    /// the status decides, and anything unrecognised is [`ApiError::Api`].
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let (kind, details) = match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let wire = envelope.error;
                let details = ErrorDetails {
                    message: wire
                        .message
                        .unwrap_or_else(|| fallback_message(status, body)),
                    code: wire.code,
                    param: wire.param,
                    decline_code: wire.decline_code,
                };
                (wire.kind, details)
            }
            Err(_) => (
                None,
                ErrorDetails {
                    message: fallback_message(status, body),
                    ..ErrorDetails::default()
                },
            ),
        };

        match kind.as_deref() {
            Some("card_error") => Self::Card { status, details },
            Some("invalid_request_error") => Self::InvalidRequest { status, details },
            Some("authentication_error") => Self::Authentication { status, details },
            Some("rate_limit_error") => Self::RateLimit { status, details },
            Some("api_error" | "api_connection_error") => Self::Api { status, details },
            _ => match status {
                400 => Self::MalformedRequest { status, details },
                401 => Self::Authentication { status, details },
                402 => Self::Card { status, details },
                404 => Self::InvalidRequest { status, details },
                429 => Self::RateLimit { status, details },
                _ => Self::Api { status, details },
            },
        }
    }

    /// Upstream detail, for kinds that come from an API response
    #[must_use]
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::MalformedRequest { details, .. }
            | Self::Authentication { details, .. }
            | Self::Card { details, .. }
            | Self::InvalidRequest { details, .. }
            | Self::RateLimit { details, .. }
            | Self::Api { details, .. } => Some(details),
            Self::Connection(_)
            | Self::Validation(_)
            | Self::UnsupportedSourceType { .. }
            | Self::Decoding(_)
            | Self::Config(_) => None,
        }
    }

    /// HTTP status of the failed response, if there was one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::MalformedRequest { status, .. }
            | Self::Authentication { status, .. }
            | Self::Card { status, .. }
            | Self::InvalidRequest { status, .. }
            | Self::RateLimit { status, .. }
            | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Offending parameter name, from the API or from local validation
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => e.first_field(),
            _ => self.details().and_then(|d| d.param.as_deref()),
        }
    }

    /// Machine-readable error code reported by the API
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.details().and_then(|d| d.code.as_deref())
    }

    /// Check if this is a card failure
    #[must_use]
    pub fn is_card_error(&self) -> bool {
        matches!(self, Self::Card { .. })
    }

    /// Check if the failure happened before any request was sent
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

fn fallback_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        format!("request failed with status {status}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_error_from_402() {
        let body = br#"{"error":{"type":"card_error","message":"Your card was declined.","code":"card_declined","decline_code":"generic_decline","param":""}}"#;
        let err = ApiError::from_response(402, body);

        assert!(err.is_card_error());
        assert_eq!(err.details().unwrap().message, "Your card was declined.");
        assert_eq!(err.code(), Some("card_declined"));
        assert_eq!(
            err.details().unwrap().decline_code.as_deref(),
            Some("generic_decline")
        );
    }

    #[test]
    fn test_invalid_request_carries_param() {
        let body = br#"{"error":{"type":"invalid_request_error","message":"No such charge: ch_x","param":"charge"}}"#;
        let err = ApiError::from_response(404, body);

        assert!(matches!(err, ApiError::InvalidRequest { status: 404, .. }));
        assert_eq!(err.param(), Some("charge"));
    }

    #[test]
    fn test_type_wins_over_status() {
        let body = br#"{"error":{"type":"invalid_request_error","message":"bad"}}"#;
        assert!(matches!(
            ApiError::from_response(402, body),
            ApiError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn test_status_fallback_without_type() {
        let body = br#"{"error":{"message":"nope"}}"#;
        assert!(matches!(
            ApiError::from_response(400, body),
            ApiError::MalformedRequest { .. }
        ));
        assert!(matches!(
            ApiError::from_response(401, body),
            ApiError::Authentication { .. }
        ));
        assert!(matches!(
            ApiError::from_response(429, body),
            ApiError::RateLimit { .. }
        ));
    }

    #[test]
    fn test_unmapped_status_is_generic() {
        let err = ApiError::from_response(418, b"");
        assert!(matches!(err, ApiError::Api { status: 418, .. }));
        assert_eq!(err.to_string(), "API error (418): request failed with status 418");

        let err = ApiError::from_response(503, b"<html>upstream down</html>");
        assert!(matches!(err, ApiError::Api { status: 503, .. }));
        assert_eq!(err.details().unwrap().message, "<html>upstream down</html>");
    }

    #[test]
    fn test_unknown_type_falls_back_to_status() {
        let body = br#"{"error":{"type":"idempotency_error","message":"Keys reused"}}"#;
        assert!(matches!(
            ApiError::from_response(400, body),
            ApiError::MalformedRequest { .. }
        ));
    }

    #[test]
    fn test_validation_param() {
        let err: ApiError = ValidationError::field("amount", "NOT_POSITIVE", "bad").into();
        assert!(err.is_local());
        assert_eq!(err.param(), Some("amount"));
        assert_eq!(err.status(), None);
    }
}
