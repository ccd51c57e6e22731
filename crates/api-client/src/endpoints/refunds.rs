//! Refund routes

use super::params::{ListParams, MetadataForm, check_metadata};
use crate::error::ApiResult;
use crate::models::{List, Metadata, Refund, RefundReason};
use crate::request::{Route, StripeRequest};
use serde::Serialize;
use stripe_core::Validator;

/// Optional parameters for [`RefundRoutes::create`]
#[derive(Debug, Clone, Default)]
pub struct CreateRefundParams {
    /// Amount to refund; defaults to the remaining refundable amount
    pub amount: Option<i64>,
    /// Why the charge is refunded
    pub reason: Option<RefundReason>,
    /// Also refund the platform fee
    pub refund_application_fee: Option<bool>,
    /// Reverse the transfer to the destination account
    pub reverse_transfer: Option<bool>,
    /// Key/value pairs to attach
    pub metadata: Option<Metadata>,
}

#[derive(Serialize)]
struct CreateForm<'a> {
    charge: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<RefundReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refund_application_fee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reverse_transfer: Option<bool>,
    #[serde(flatten)]
    metadata: MetadataForm<'a>,
}

#[derive(Serialize)]
struct UpdateForm<'a> {
    #[serde(flatten)]
    metadata: MetadataForm<'a>,
}

#[derive(Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    charge: Option<&'a str>,
    #[serde(flatten)]
    page: &'a ListParams,
}

/// Builders for `/v1/refunds`
#[derive(Debug, Clone, Copy, Default)]
pub struct RefundRoutes;

impl RefundRoutes {
    /// Refund all or part of a charge
    ///
    /// POST /v1/refunds
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the charge identifier is
    /// malformed, the amount is not positive, or the reason is
    /// [`RefundReason::ExpiredUncapturedCharge`] or [`RefundReason::Unknown`],
    /// which only the API assigns.
    pub fn create(
        &self,
        charge: &str,
        params: &CreateRefundParams,
    ) -> ApiResult<StripeRequest<Refund>> {
        let validator = Validator::new()
            .identifier("charge", charge)
            .custom("reason", || {
                match params.reason {
                    Some(reason @ (RefundReason::ExpiredUncapturedCharge | RefundReason::Unknown)) => {
                        Some(format!("{reason} cannot be requested"))
                    }
                    _ => None,
                }
            });
        let validator = match params.amount {
            Some(amount) => validator.positive("amount", amount),
            None => validator,
        };
        check_metadata(validator, params.metadata.as_ref()).finish()?;

        let form = CreateForm {
            charge,
            amount: params.amount,
            reason: params.reason,
            refund_application_fee: params.refund_application_fee,
            reverse_transfer: params.reverse_transfer,
            metadata: MetadataForm(params.metadata.as_ref()),
        };
        StripeRequest::post(Route::Refunds, &form)
    }

    /// Retrieve a refund
    ///
    /// GET /v1/refunds/{refund}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier is malformed.
    pub fn retrieve(&self, refund: &str) -> ApiResult<StripeRequest<Refund>> {
        Validator::new().identifier("refund", refund).finish()?;
        Ok(StripeRequest::get(Route::Refund(refund.to_string())))
    }

    /// Replace metadata on a refund; an empty value unsets that key
    ///
    /// POST /v1/refunds/{refund}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier or metadata
    /// is invalid.
    pub fn update(&self, refund: &str, metadata: &Metadata) -> ApiResult<StripeRequest<Refund>> {
        let validator = Validator::new().identifier("refund", refund);
        check_metadata(validator, Some(metadata)).finish()?;

        let form = UpdateForm {
            metadata: MetadataForm(Some(metadata)),
        };
        StripeRequest::post(Route::Refund(refund.to_string()), &form)
    }

    /// List refunds, newest first, optionally for one charge
    ///
    /// GET /v1/refunds
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the page parameters or the
    /// charge identifier are invalid.
    pub fn list(
        &self,
        charge: Option<&str>,
        page: &ListParams,
    ) -> ApiResult<StripeRequest<List<Refund>>> {
        let validator = Validator::new().optional_identifier("charge", charge);
        page.check(validator).finish()?;

        StripeRequest::get(Route::Refunds).with_query(&ListQuery { charge, page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode;
    use crate::request::Method;

    #[test]
    fn test_create_refund_body() {
        let params = CreateRefundParams {
            amount: Some(500),
            reason: Some(RefundReason::RequestedByCustomer),
            ..CreateRefundParams::default()
        };
        let request = RefundRoutes.create("ch_1", &params).unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/v1/refunds");
        assert_eq!(
            request.form_pairs(),
            vec![
                ("charge".to_string(), "ch_1".to_string()),
                ("amount".to_string(), "500".to_string()),
                ("reason".to_string(), "requested_by_customer".to_string()),
            ]
        );
        assert!(request.headers().is_empty());

        let refund: Refund =
            decode(br#"{"id":"re_1","amount":500,"reason":"requested_by_customer"}"#).unwrap();
        assert_eq!(refund.amount, 500);
        assert_eq!(refund.reason, Some(RefundReason::RequestedByCustomer));
    }

    #[test]
    fn test_full_refund_sends_only_charge() {
        let request = RefundRoutes
            .create("ch_1", &CreateRefundParams::default())
            .unwrap();
        assert_eq!(request.body(), Some("charge=ch_1"));
    }

    #[test]
    fn test_create_validation() {
        let params = CreateRefundParams {
            amount: Some(-1),
            reason: Some(RefundReason::ExpiredUncapturedCharge),
            ..CreateRefundParams::default()
        };
        let err = RefundRoutes.create("ch 1", &params).unwrap_err();
        let crate::ApiError::Validation(err) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["charge", "reason", "amount"]);
    }

    #[test]
    fn test_unmodelled_reason_is_rejected() {
        let params = CreateRefundParams {
            reason: Some(RefundReason::Unknown),
            ..CreateRefundParams::default()
        };
        let err = RefundRoutes.create("ch_1", &params).unwrap_err();
        assert_eq!(err.param(), Some("reason"));
    }

    #[test]
    fn test_update_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("ticket".to_string(), "T-7".to_string());
        metadata.insert("stale".to_string(), String::new());

        let request = RefundRoutes.update("re_1", &metadata).unwrap();
        assert_eq!(request.path(), "/v1/refunds/re_1");
        assert_eq!(
            request.form_pairs(),
            vec![
                ("metadata[stale]".to_string(), String::new()),
                ("metadata[ticket]".to_string(), "T-7".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_by_charge() {
        let page = ListParams::new().with_limit(2).ending_before("re_9");
        let request = RefundRoutes.list(Some("ch_1"), &page).unwrap();
        assert_eq!(request.path(), "/v1/refunds");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("charge".to_string(), "ch_1".to_string()),
                ("limit".to_string(), "2".to_string()),
                ("ending_before".to_string(), "re_9".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_rejects_oversized_page() {
        let page = ListParams::new().with_limit(101);
        let err = RefundRoutes.list(None, &page).unwrap_err();
        assert_eq!(err.param(), Some("limit"));
    }
}
