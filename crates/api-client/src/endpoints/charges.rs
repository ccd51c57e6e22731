//! Charge routes

use super::params::{ListParams, MetadataForm, check_metadata};
use crate::error::ApiResult;
use crate::models::{Charge, List, Metadata};
use crate::request::{Route, StripeRequest};
use serde::Serialize;
use stripe_core::{Currency, Validator};

/// Longest statement descriptor the card networks accept
pub const MAX_STATEMENT_DESCRIPTOR_LEN: usize = 22;

/// Shipping address for a charge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    /// First address line
    #[serde(rename = "shipping[address][line1]")]
    pub line1: String,
    /// Apartment, suite or building
    #[serde(
        rename = "shipping[address][line2]",
        skip_serializing_if = "Option::is_none"
    )]
    pub line2: Option<String>,
    /// City or locality
    #[serde(
        rename = "shipping[address][city]",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    /// State, county or province
    #[serde(
        rename = "shipping[address][state]",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,
    /// ZIP or postal code
    #[serde(
        rename = "shipping[address][postal_code]",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2
    #[serde(
        rename = "shipping[address][country]",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
}

/// Shipping details attached to a new charge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingParams {
    /// Recipient name
    #[serde(rename = "shipping[name]")]
    pub name: String,
    /// Recipient address
    #[serde(flatten)]
    pub address: ShippingAddress,
    /// Recipient phone number
    #[serde(rename = "shipping[phone]", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Delivery service
    #[serde(rename = "shipping[carrier]", skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Carrier tracking number
    #[serde(
        rename = "shipping[tracking_number]",
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_number: Option<String>,
}

/// Optional parameters for [`ChargeRoutes::create`]
///
/// Either `source` or `customer` must be set.
#[derive(Debug, Clone, Default)]
pub struct CreateChargeParams {
    /// Platform fee in minor units, at most the charge amount
    pub application_fee: Option<i64>,
    /// `false` authorizes only; capture later with [`ChargeRoutes::capture`]
    pub capture: Option<bool>,
    /// Free-form description
    pub description: Option<String>,
    /// Connected account that receives the funds
    pub destination: Option<String>,
    /// Portion transferred to `destination`; requires `destination`
    pub destination_amount: Option<i64>,
    /// Groups this charge with related transfers
    pub transfer_group: Option<String>,
    /// Account the charge is made on behalf of
    pub on_behalf_of: Option<String>,
    /// Address the receipt is sent to
    pub receipt_email: Option<String>,
    /// Shipping details
    pub shipping: Option<ShippingParams>,
    /// Customer to charge
    pub customer: Option<String>,
    /// Text on the customer's statement
    pub statement_descriptor: Option<String>,
    /// Token or source identifier to charge
    pub source: Option<String>,
    /// Key/value pairs to attach
    pub metadata: Option<Metadata>,
    /// Connected account to create the charge on
    pub on_account: Option<String>,
}

/// User assessment of a charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudReport {
    /// The charge was fraudulent
    Fraudulent,
    /// The charge was legitimate
    Safe,
}

/// Parameters for [`ChargeRoutes::update`]
#[derive(Debug, Clone, Default)]
pub struct UpdateChargeParams {
    /// Free-form description
    pub description: Option<String>,
    /// Address the receipt is sent to
    pub receipt_email: Option<String>,
    /// Groups this charge with related transfers
    pub transfer_group: Option<String>,
    /// Key/value pairs to merge into existing metadata
    pub metadata: Option<Metadata>,
    /// Mark the charge as safe or fraudulent
    pub fraud_details: Option<FraudReport>,
}

/// Parameters for [`ChargeRoutes::capture`]
#[derive(Debug, Clone, Default)]
pub struct CaptureChargeParams {
    /// Amount to capture; defaults to the full authorized amount
    pub amount: Option<i64>,
    /// Platform fee in minor units, at most the captured amount
    pub application_fee: Option<i64>,
    /// Address the receipt is sent to
    pub receipt_email: Option<String>,
    /// Text on the customer's statement
    pub statement_descriptor: Option<String>,
}

#[derive(Serialize)]
struct CreateForm<'a> {
    amount: i64,
    currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "destination[account]", skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    #[serde(rename = "destination[amount]", skip_serializing_if = "Option::is_none")]
    destination_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfer_group: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_behalf_of: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt_email: Option<&'a str>,
    #[serde(flatten)]
    shipping: Option<&'a ShippingParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement_descriptor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(flatten)]
    metadata: MetadataForm<'a>,
}

#[derive(Serialize)]
struct UpdateForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfer_group: Option<&'a str>,
    #[serde(
        rename = "fraud_details[user_report]",
        skip_serializing_if = "Option::is_none"
    )]
    fraud_details: Option<FraudReport>,
    #[serde(flatten)]
    metadata: MetadataForm<'a>,
}

#[derive(Serialize)]
struct CaptureForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement_descriptor: Option<&'a str>,
}

#[derive(Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<&'a str>,
    #[serde(flatten)]
    page: &'a ListParams,
}

fn check_descriptor(validator: Validator, descriptor: Option<&str>) -> Validator {
    let Some(descriptor) = descriptor else {
        return validator;
    };
    validator
        .required("statement_descriptor", descriptor)
        .max_length("statement_descriptor", descriptor, MAX_STATEMENT_DESCRIPTOR_LEN)
        .custom("statement_descriptor", || {
            descriptor
                .contains(['<', '>', '"', '\''])
                .then(|| "Cannot contain <, >, \" or '".to_string())
        })
}

fn check_fee(validator: Validator, fee: Option<i64>, amount: Option<i64>) -> Validator {
    match fee {
        Some(fee) => validator.range("application_fee", fee, 0, amount.unwrap_or(i64::MAX)),
        None => validator,
    }
}

/// Builders for `/v1/charges`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeRoutes;

impl ChargeRoutes {
    /// Charge a source or customer
    ///
    /// POST /v1/charges
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the amount is not positive,
    /// neither a source nor a customer is given, the statement descriptor is
    /// too long, fees exceed the amount, or any identifier is malformed.
    pub fn create(
        &self,
        amount: i64,
        currency: Currency,
        params: &CreateChargeParams,
    ) -> ApiResult<StripeRequest<Charge>> {
        let validator = Validator::new()
            .positive("amount", amount)
            .custom("source", || {
                (params.source.is_none() && params.customer.is_none())
                    .then(|| "A source or a customer is required".to_string())
            })
            .optional_identifier("source", params.source.as_deref())
            .optional_identifier("customer", params.customer.as_deref())
            .optional_identifier("destination", params.destination.as_deref())
            .optional_identifier("on_behalf_of", params.on_behalf_of.as_deref())
            .optional_identifier("on_account", params.on_account.as_deref())
            .email("receipt_email", params.receipt_email.as_deref());
        let validator = check_fee(validator, params.application_fee, Some(amount));
        let validator = match params.destination_amount {
            Some(portion) => validator
                .range("destination[amount]", portion, 0, amount)
                .custom("destination[amount]", || {
                    params
                        .destination
                        .is_none()
                        .then(|| "Requires a destination account".to_string())
                }),
            None => validator,
        };
        let validator = match &params.shipping {
            Some(shipping) => validator
                .required("shipping[name]", &shipping.name)
                .required("shipping[address][line1]", &shipping.address.line1),
            None => validator,
        };
        let validator = check_descriptor(validator, params.statement_descriptor.as_deref());
        check_metadata(validator, params.metadata.as_ref()).finish()?;

        let form = CreateForm {
            amount,
            currency,
            application_fee: params.application_fee,
            capture: params.capture,
            description: params.description.as_deref(),
            destination: params.destination.as_deref(),
            destination_amount: params.destination_amount,
            transfer_group: params.transfer_group.as_deref(),
            on_behalf_of: params.on_behalf_of.as_deref(),
            receipt_email: params.receipt_email.as_deref(),
            shipping: params.shipping.as_ref(),
            customer: params.customer.as_deref(),
            statement_descriptor: params.statement_descriptor.as_deref(),
            source: params.source.as_deref(),
            metadata: MetadataForm(params.metadata.as_ref()),
        };
        Ok(StripeRequest::post(Route::Charges, &form)?.on_account(params.on_account.as_deref()))
    }

    /// Retrieve a charge
    ///
    /// GET /v1/charges/{charge}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier is malformed.
    pub fn retrieve(&self, charge: &str) -> ApiResult<StripeRequest<Charge>> {
        Validator::new().identifier("charge", charge).finish()?;
        Ok(StripeRequest::get(Route::Charge(charge.to_string())))
    }

    /// Update mutable fields of a charge
    ///
    /// POST /v1/charges/{charge}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier, email or
    /// metadata is invalid.
    pub fn update(
        &self,
        charge: &str,
        params: &UpdateChargeParams,
    ) -> ApiResult<StripeRequest<Charge>> {
        let validator = Validator::new()
            .identifier("charge", charge)
            .email("receipt_email", params.receipt_email.as_deref());
        check_metadata(validator, params.metadata.as_ref()).finish()?;

        let form = UpdateForm {
            description: params.description.as_deref(),
            receipt_email: params.receipt_email.as_deref(),
            transfer_group: params.transfer_group.as_deref(),
            fraud_details: params.fraud_details,
            metadata: MetadataForm(params.metadata.as_ref()),
        };
        StripeRequest::post(Route::Charge(charge.to_string()), &form)
    }

    /// Capture an authorized charge
    ///
    /// POST /v1/charges/{charge}/capture
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier is malformed,
    /// the amount is not positive, or the fee exceeds the captured amount.
    pub fn capture(
        &self,
        charge: &str,
        params: &CaptureChargeParams,
    ) -> ApiResult<StripeRequest<Charge>> {
        let validator = Validator::new()
            .identifier("charge", charge)
            .email("receipt_email", params.receipt_email.as_deref());
        let validator = match params.amount {
            Some(amount) => validator.positive("amount", amount),
            None => validator,
        };
        let validator = check_fee(validator, params.application_fee, params.amount);
        check_descriptor(validator, params.statement_descriptor.as_deref()).finish()?;

        let form = CaptureForm {
            amount: params.amount,
            application_fee: params.application_fee,
            receipt_email: params.receipt_email.as_deref(),
            statement_descriptor: params.statement_descriptor.as_deref(),
        };
        StripeRequest::post(Route::ChargeCapture(charge.to_string()), &form)
    }

    /// List charges, newest first, optionally for one customer
    ///
    /// GET /v1/charges
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the page parameters or the
    /// customer identifier are invalid.
    pub fn list(
        &self,
        page: &ListParams,
        customer: Option<&str>,
    ) -> ApiResult<StripeRequest<List<Charge>>> {
        let validator = Validator::new().optional_identifier("customer", customer);
        page.check(validator).finish()?;

        StripeRequest::get(Route::Charges).with_query(&ListQuery { customer, page })
    }
}
