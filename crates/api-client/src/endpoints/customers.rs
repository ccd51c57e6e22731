//! Customer routes

use super::params::{ListParams, MetadataForm, check_metadata};
use crate::error::ApiResult;
use crate::models::{Customer, DeletedObject, List, Metadata};
use crate::request::{Route, StripeRequest};
use serde::Serialize;
use stripe_core::{Currency, Validator};

/// Parameters for [`CustomerRoutes::create`] and [`CustomerRoutes::update`]
#[derive(Debug, Clone, Default)]
pub struct CustomerParams {
    /// Contact email
    pub email: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Token to attach as the default source
    pub source: Option<String>,
    /// Starting balance in minor units; negative is a credit
    pub account_balance: Option<i64>,
    /// Currency of the balance
    pub currency: Option<Currency>,
    /// Key/value pairs to attach
    pub metadata: Option<Metadata>,
}

#[derive(Serialize)]
struct CustomerForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_balance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(flatten)]
    metadata: MetadataForm<'a>,
}

impl<'a> CustomerForm<'a> {
    fn checked(params: &'a CustomerParams, validator: Validator) -> ApiResult<Self> {
        let validator = validator
            .email("email", params.email.as_deref())
            .optional_identifier("source", params.source.as_deref());
        check_metadata(validator, params.metadata.as_ref()).finish()?;

        Ok(Self {
            email: params.email.as_deref(),
            description: params.description.as_deref(),
            source: params.source.as_deref(),
            account_balance: params.account_balance,
            currency: params.currency,
            metadata: MetadataForm(params.metadata.as_ref()),
        })
    }
}

#[derive(Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(flatten)]
    page: &'a ListParams,
}

/// Builders for `/v1/customers`
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerRoutes;

impl CustomerRoutes {
    /// Create a customer
    ///
    /// POST /v1/customers
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the email, source or
    /// metadata is invalid.
    pub fn create(&self, params: &CustomerParams) -> ApiResult<StripeRequest<Customer>> {
        let form = CustomerForm::checked(params, Validator::new())?;
        StripeRequest::post(Route::Customers, &form)
    }

    /// Retrieve a customer
    ///
    /// GET /v1/customers/{customer}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier is malformed.
    pub fn retrieve(&self, customer: &str) -> ApiResult<StripeRequest<Customer>> {
        Validator::new().identifier("customer", customer).finish()?;
        Ok(StripeRequest::get(Route::Customer(customer.to_string())))
    }

    /// Update a customer; unset fields are left unchanged
    ///
    /// POST /v1/customers/{customer}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier or any
    /// parameter is invalid.
    pub fn update(
        &self,
        customer: &str,
        params: &CustomerParams,
    ) -> ApiResult<StripeRequest<Customer>> {
        let validator = Validator::new().identifier("customer", customer);
        let form = CustomerForm::checked(params, validator)?;
        StripeRequest::post(Route::Customer(customer.to_string()), &form)
    }

    /// Permanently delete a customer
    ///
    /// DELETE /v1/customers/{customer}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier is malformed.
    pub fn delete(&self, customer: &str) -> ApiResult<StripeRequest<DeletedObject>> {
        Validator::new().identifier("customer", customer).finish()?;
        Ok(StripeRequest::delete(Route::Customer(customer.to_string())))
    }

    /// List customers, newest first, optionally matching an email exactly
    ///
    /// GET /v1/customers
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the page parameters are invalid.
    pub fn list(
        &self,
        page: &ListParams,
        email: Option<&str>,
    ) -> ApiResult<StripeRequest<List<Customer>>> {
        let validator = Validator::new().max_length("email", email.unwrap_or_default(), 512);
        page.check(validator).finish()?;

        StripeRequest::get(Route::Customers).with_query(&ListQuery { email, page })
    }
}
