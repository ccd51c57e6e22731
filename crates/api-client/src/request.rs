//! Request values produced by route builders
//!
//! A [`StripeRequest`] is plain data: method, route, query, headers and an
//! already encoded form body. It is typed by the model its response decodes
//! into, so `client.send(request)` needs no turbofish.

use crate::client::StripeClient;
use crate::error::{ApiError, ApiResult};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use stripe_core::ValidationError;

/// Header naming the connected account a call acts on behalf of
pub const ACCOUNT_HEADER: &str = "Stripe-Account";

/// Header carrying a caller-supplied idempotency key
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Retrieve and list operations
    Get,
    /// Create and update operations
    Post,
    /// Delete operations
    Delete,
}

impl Method {
    /// Uppercase method name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL template for one resource operation
///
/// Identifiers are validated by the builder before a route is constructed,
/// so they never need escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/v1/tokens`
    Tokens,
    /// `/v1/tokens/{id}`
    Token(String),
    /// `/v1/charges`
    Charges,
    /// `/v1/charges/{id}`
    Charge(String),
    /// `/v1/charges/{id}/capture`
    ChargeCapture(String),
    /// `/v1/refunds`
    Refunds,
    /// `/v1/refunds/{id}`
    Refund(String),
    /// `/v1/customers`
    Customers,
    /// `/v1/customers/{id}`
    Customer(String),
}

impl Route {
    /// Path relative to the API base URL
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Tokens => "/v1/tokens".to_string(),
            Self::Token(id) => format!("/v1/tokens/{id}"),
            Self::Charges => "/v1/charges".to_string(),
            Self::Charge(id) => format!("/v1/charges/{id}"),
            Self::ChargeCapture(id) => format!("/v1/charges/{id}/capture"),
            Self::Refunds => "/v1/refunds".to_string(),
            Self::Refund(id) => format!("/v1/refunds/{id}"),
            Self::Customers => "/v1/customers".to_string(),
            Self::Customer(id) => format!("/v1/customers/{id}"),
        }
    }
}

/// A built request whose successful response decodes into `M`
pub struct StripeRequest<M> {
    method: Method,
    route: Route,
    query: Option<String>,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    response: PhantomData<fn() -> M>,
}

impl<M> StripeRequest<M> {
    fn new(method: Method, route: Route) -> Self {
        Self {
            method,
            route,
            query: None,
            headers: BTreeMap::new(),
            body: None,
            response: PhantomData,
        }
    }

    pub(crate) fn get(route: Route) -> Self {
        Self::new(Method::Get, route)
    }

    pub(crate) fn delete(route: Route) -> Self {
        Self::new(Method::Delete, route)
    }

    /// POST with a form-encoded body; an empty form sends no body at all
    pub(crate) fn post<F: Serialize>(route: Route, form: &F) -> ApiResult<Self> {
        let mut request = Self::new(Method::Post, route);
        request.body = encode("body", form)?;
        Ok(request)
    }

    pub(crate) fn with_query<Q: Serialize>(mut self, query: &Q) -> ApiResult<Self> {
        self.query = encode("query", query)?;
        Ok(self)
    }

    /// Act on behalf of a connected account; `None` leaves headers untouched
    pub(crate) fn on_account(mut self, account: Option<&str>) -> Self {
        if let Some(account) = account {
            self.headers
                .insert(ACCOUNT_HEADER.to_string(), account.to_string());
        }
        self
    }

    /// Attach an idempotency key so the API can deduplicate retried calls
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the key is blank or longer than 255
    /// characters.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> ApiResult<Self> {
        let key = key.into();
        stripe_core::Validator::new()
            .required(IDEMPOTENCY_HEADER, &key)
            .max_length(IDEMPOTENCY_HEADER, &key, 255)
            .finish()?;
        self.headers.insert(IDEMPOTENCY_HEADER.to_string(), key);
        Ok(self)
    }

    /// HTTP method
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Route template
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Path relative to the API base URL
    #[must_use]
    pub fn path(&self) -> String {
        self.route.path()
    }

    /// Encoded query string, without the leading `?`
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Per-call headers set by the builder
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a per-call header
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Encoded `application/x-www-form-urlencoded` body
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Decoded view of the body as ordered key/value pairs
    #[must_use]
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        decode_pairs(self.body.as_deref())
    }

    /// Decoded view of the query string as ordered key/value pairs
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        decode_pairs(self.query.as_deref())
    }
}

impl<M: DeserializeOwned> StripeRequest<M> {
    /// Dispatch through `client` and decode the response
    ///
    /// # Errors
    ///
    /// See [`StripeClient::send`].
    pub async fn send<T: Transport>(self, client: &StripeClient<T>) -> ApiResult<M> {
        client.send(self).await
    }
}

impl<M> Clone for StripeRequest<M> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            route: self.route.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            response: PhantomData,
        }
    }
}

impl<M> fmt::Debug for StripeRequest<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bodies can carry card numbers; only report their size.
        f.debug_struct("StripeRequest")
            .field("method", &self.method)
            .field("path", &self.route.path())
            .field("query", &self.query)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("body_len", &self.body.as_ref().map(String::len))
            .finish()
    }
}

fn encode<F: Serialize>(part: &str, form: &F) -> ApiResult<Option<String>> {
    let encoded = serde_urlencoded::to_string(form).map_err(|e| {
        ApiError::Validation(ValidationError::field(part, "ENCODING", e.to_string()))
    })?;
    Ok((!encoded.is_empty()).then_some(encoded))
}

fn decode_pairs(encoded: Option<&str>) -> Vec<(String, String)> {
    encoded
        .and_then(|s| serde_urlencoded::from_str(s).ok())
        .unwrap_or_default()
}
