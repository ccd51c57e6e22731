//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{ChargeRoutes, CustomerRoutes, RefundRoutes, TokenRoutes};
use crate::error::{ApiError, ApiResult};
use crate::models::decode;
use crate::request::StripeRequest;
use crate::transport::{HttpRequest, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Span, debug, field, instrument, warn};
use uuid::Uuid;

/// Response header carrying the API's own request identifier
pub const REQUEST_ID_HEADER: &str = "Request-Id";

const VERSION_HEADER: &str = "Stripe-Version";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const USER_AGENT: &str = concat!("stripe-api-client/", env!("CARGO_PKG_VERSION"));

/// Stripe API client
///
/// Holds the read-only configuration and the transport. Cloning is cheap and
/// clones share both. Each [`send`](Self::send) performs exactly one exchange;
/// nothing is retried or cached.
pub struct StripeClient<T = HttpTransport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
}

impl StripeClient<HttpTransport> {
    /// Create a new client with configuration from environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the environment does not describe a
    /// valid configuration, or [`ApiError::Connection`] if the HTTP client
    /// cannot be initialised.
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    ///
    /// # Errors
    ///
    /// See [`StripeClient::new`].
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> StripeClient<T> {
    /// Create a client over a caller-supplied transport
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configuration is invalid.
    pub fn with_transport(config: ClientConfig, transport: T) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The underlying transport
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -------------------------------------------------------------------------
    // Resource route accessors
    // -------------------------------------------------------------------------

    /// Token routes
    #[must_use]
    pub fn tokens(&self) -> TokenRoutes {
        TokenRoutes
    }

    /// Charge routes
    #[must_use]
    pub fn charges(&self) -> ChargeRoutes {
        ChargeRoutes
    }

    /// Refund routes
    #[must_use]
    pub fn refunds(&self) -> RefundRoutes {
        RefundRoutes
    }

    /// Customer routes
    #[must_use]
    pub fn customers(&self) -> CustomerRoutes {
        CustomerRoutes
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Execute `request` once and decode the response
    ///
    /// Dropping the returned future cancels the call.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Connection`] if the transport produced no response
    /// - the kind chosen by [`ApiError::from_response`] for non-2xx statuses
    /// - [`ApiError::Decoding`] if a 2xx body does not match `M`
    #[instrument(
        skip(self, request),
        fields(method = %request.method(), path = %request.path(), request_id = field::Empty)
    )]
    pub async fn send<M: DeserializeOwned>(&self, request: StripeRequest<M>) -> ApiResult<M> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let http = self.prepare(&request);
        let start = Instant::now();
        let response = match self.transport.execute(http).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    elapsed_ms = start.elapsed().as_millis(),
                    error = %e,
                    "Transport failed"
                );
                return Err(ApiError::Connection(e));
            }
        };
        let elapsed = start.elapsed();
        let stripe_request_id = response.header(REQUEST_ID_HEADER).unwrap_or_default();

        if response.is_success() {
            debug!(
                request_id = %request_id,
                status = response.status,
                elapsed_ms = elapsed.as_millis(),
                stripe_request_id,
                "Request succeeded"
            );
            decode(&response.body)
        } else {
            let err = ApiError::from_response(response.status, &response.body);
            warn!(
                request_id = %request_id,
                status = response.status,
                elapsed_ms = elapsed.as_millis(),
                stripe_request_id,
                error = %err,
                "Request failed"
            );
            Err(err)
        }
    }

    /// Resolve a built request against this client's configuration
    fn prepare<M>(&self, request: &StripeRequest<M>) -> HttpRequest {
        let mut url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            request.path()
        );
        if let Some(query) = request.query() {
            url.push('?');
            url.push_str(query);
        }

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.secret_key),
            ),
            (VERSION_HEADER.to_string(), self.config.api_version.clone()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if request.body().is_some() {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
        }
        headers.extend(
            request
                .headers()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        HttpRequest {
            method: request.method(),
            url,
            headers,
            body: request.body().map(|body| body.as_bytes().to_vec()),
        }
    }
}

impl<T> Clone for StripeClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T> fmt::Debug for StripeClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
