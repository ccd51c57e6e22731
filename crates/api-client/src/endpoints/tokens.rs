//! Token routes
//!
//! Tokens exchange raw card, bank account or personal identity details for a
//! single-use identifier. Card and account numbers are normalized with
//! [`clean_number`] before they are encoded.

use crate::error::ApiResult;
use crate::models::{AccountHolderType, Token};
use crate::request::{Route, StripeRequest};
use serde::Serialize;
use stripe_core::{Currency, Validator, clean_number};

/// Optional parameters for [`TokenRoutes::create_card_token`]
#[derive(Debug, Clone, Default)]
pub struct CardTokenParams {
    /// Cardholder name
    pub name: Option<String>,
    /// Payout currency when the card is used for a connected account
    pub currency: Option<Currency>,
    /// Connected account to create the token on
    pub on_account: Option<String>,
}

/// Optional parameters for [`TokenRoutes::create_bank_account_token`]
#[derive(Debug, Clone, Default)]
pub struct BankAccountTokenParams {
    /// Routing number, sort code or equivalent
    pub routing_number: Option<String>,
    /// Name of the person or business owning the account
    pub account_holder_name: Option<String>,
    /// Owner kind
    pub account_holder_type: Option<AccountHolderType>,
    /// Connected account to create the token on
    pub on_account: Option<String>,
}

#[derive(Serialize)]
struct CardForm<'a> {
    #[serde(rename = "card[number]")]
    number: &'a str,
    #[serde(rename = "card[exp_month]")]
    exp_month: u32,
    #[serde(rename = "card[exp_year]")]
    exp_year: u32,
    #[serde(rename = "card[cvc]")]
    cvc: &'a str,
    #[serde(rename = "card[name]", skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "card[currency]", skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
}

#[derive(Serialize)]
struct BankAccountForm<'a> {
    #[serde(rename = "bank_account[account_number]")]
    account_number: &'a str,
    #[serde(rename = "bank_account[country]")]
    country: &'a str,
    #[serde(rename = "bank_account[currency]")]
    currency: Currency,
    #[serde(
        rename = "bank_account[routing_number]",
        skip_serializing_if = "Option::is_none"
    )]
    routing_number: Option<&'a str>,
    #[serde(
        rename = "bank_account[account_holder_name]",
        skip_serializing_if = "Option::is_none"
    )]
    account_holder_name: Option<&'a str>,
    #[serde(
        rename = "bank_account[account_holder_type]",
        skip_serializing_if = "Option::is_none"
    )]
    account_holder_type: Option<AccountHolderType>,
}

#[derive(Serialize)]
struct PiiForm<'a> {
    #[serde(rename = "pii[personal_id_number]")]
    personal_id_number: &'a str,
}

#[derive(Serialize)]
struct CustomerForm<'a> {
    customer: &'a str,
}

/// Builders for `/v1/tokens`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenRoutes;

impl TokenRoutes {
    /// Tokenize a card
    ///
    /// POST /v1/tokens
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the cleaned number is not
    /// 12-19 digits, the month is outside 1-12, the year is neither two nor
    /// four digits, or the CVC is not 3-4 digits.
    pub fn create_card_token(
        &self,
        number: &str,
        exp_month: u32,
        exp_year: u32,
        cvc: &str,
        params: &CardTokenParams,
    ) -> ApiResult<StripeRequest<Token>> {
        let number = clean_number(number);
        Validator::new()
            .digits("card[number]", &number, 12, 19)
            .range("card[exp_month]", exp_month, 1, 12)
            .custom("card[exp_year]", || {
                (!(exp_year < 100 || (1000..=9999).contains(&exp_year)))
                    .then(|| "Must be a two or four digit year".to_string())
            })
            .digits("card[cvc]", cvc, 3, 4)
            .optional_identifier("on_account", params.on_account.as_deref())
            .finish()?;

        let form = CardForm {
            number: &number,
            exp_month,
            exp_year,
            cvc,
            name: params.name.as_deref(),
            currency: params.currency,
        };
        Ok(StripeRequest::post(Route::Tokens, &form)?.on_account(params.on_account.as_deref()))
    }

    /// Tokenize a bank account
    ///
    /// POST /v1/tokens
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the account number is blank
    /// or not alphanumeric after cleaning, or the country is not an ISO code.
    pub fn create_bank_account_token(
        &self,
        account_number: &str,
        country: &str,
        currency: Currency,
        params: &BankAccountTokenParams,
    ) -> ApiResult<StripeRequest<Token>> {
        // IBANs are accepted here, so letters are allowed.
        let account_number = clean_number(account_number);
        let routing_number = params.routing_number.as_deref().map(clean_number);
        Validator::new()
            .required("bank_account[account_number]", &account_number)
            .max_length("bank_account[account_number]", &account_number, 34)
            .custom("bank_account[account_number]", || {
                (!account_number.chars().all(|c| c.is_ascii_alphanumeric()))
                    .then(|| "Must contain only letters and digits".to_string())
            })
            .country_code("bank_account[country]", country)
            .optional_identifier("on_account", params.on_account.as_deref())
            .finish()?;

        let form = BankAccountForm {
            account_number: &account_number,
            country,
            currency,
            routing_number: routing_number.as_deref(),
            account_holder_name: params.account_holder_name.as_deref(),
            account_holder_type: params.account_holder_type,
        };
        Ok(StripeRequest::post(Route::Tokens, &form)?.on_account(params.on_account.as_deref()))
    }

    /// Tokenize a personal identification number
    ///
    /// POST /v1/tokens
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the number is blank.
    pub fn create_pii_token(&self, personal_id_number: &str) -> ApiResult<StripeRequest<Token>> {
        Validator::new()
            .required("pii[personal_id_number]", personal_id_number)
            .finish()?;

        StripeRequest::post(Route::Tokens, &PiiForm { personal_id_number })
    }

    /// Share a platform customer's default source with a connected account
    ///
    /// POST /v1/tokens
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if either identifier is malformed.
    pub fn create_customer_token(
        &self,
        customer: &str,
        on_account: Option<&str>,
    ) -> ApiResult<StripeRequest<Token>> {
        Validator::new()
            .identifier("customer", customer)
            .optional_identifier("on_account", on_account)
            .finish()?;

        Ok(StripeRequest::post(Route::Tokens, &CustomerForm { customer })?.on_account(on_account))
    }

    /// Retrieve a token
    ///
    /// GET /v1/tokens/{token}
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::Validation`] if the identifier is malformed.
    pub fn retrieve(&self, token: &str) -> ApiResult<StripeRequest<Token>> {
        Validator::new().identifier("token", token).finish()?;
        Ok(StripeRequest::get(Route::Token(token.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::request::{ACCOUNT_HEADER, Method};

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_card_token_body() {
        let request = TokenRoutes
            .create_card_token("4242 4242 4242 4242", 10, 2018, "123", &CardTokenParams::default())
            .unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/v1/tokens");
        assert_eq!(
            request.form_pairs(),
            pairs(&[
                ("card[number]", "4242424242424242"),
                ("card[exp_month]", "10"),
                ("card[exp_year]", "2018"),
                ("card[cvc]", "123"),
            ])
        );
        assert!(request.headers().is_empty());
        assert_eq!(request.query(), None);
    }

    #[test]
    fn test_card_token_optionals() {
        let params = CardTokenParams {
            name: Some("Jane Doe".to_string()),
            currency: Some(Currency::Eur),
            on_account: Some("acct_1".to_string()),
        };
        let request = TokenRoutes
            .create_card_token("4000-0566-5566-5556", 1, 30, "0123", &params)
            .unwrap();

        let body = request.form_pairs();
        assert!(body.contains(&("card[name]".to_string(), "Jane Doe".to_string())));
        assert!(body.contains(&("card[currency]".to_string(), "eur".to_string())));
        assert!(body.contains(&("card[cvc]".to_string(), "0123".to_string())));
        assert!(!body.iter().any(|(k, _)| k == "on_account"));
        assert_eq!(request.header(ACCOUNT_HEADER), Some("acct_1"));
    }

    #[test]
    fn test_card_token_validation() {
        let err = TokenRoutes
            .create_card_token("4242", 13, 201, "1", &CardTokenParams::default())
            .unwrap_err();

        let ApiError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = validation.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["card[number]", "card[exp_month]", "card[exp_year]", "card[cvc]"]
        );
        // Card data never appears in the error
        assert!(!validation.to_string().contains("4242"));
    }

    #[test]
    fn test_bank_account_token() {
        let params = BankAccountTokenParams {
            routing_number: Some("110 000 000".to_string()),
            account_holder_type: Some(AccountHolderType::Individual),
            ..BankAccountTokenParams::default()
        };
        let request = TokenRoutes
            .create_bank_account_token("000-123-456-789", "US", Currency::Usd, &params)
            .unwrap();

        assert_eq!(
            request.form_pairs(),
            pairs(&[
                ("bank_account[account_number]", "000123456789"),
                ("bank_account[country]", "US"),
                ("bank_account[currency]", "usd"),
                ("bank_account[routing_number]", "110000000"),
                ("bank_account[account_holder_type]", "individual"),
            ])
        );
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_bank_account_token_accepts_iban() {
        let request = TokenRoutes
            .create_bank_account_token(
                "DE89 3704 0044 0532 0130 00",
                "DE",
                Currency::Eur,
                &BankAccountTokenParams::default(),
            )
            .unwrap();
        assert_eq!(
            request.form_pairs()[0].1,
            "DE89370400440532013000".to_string()
        );
    }

    #[test]
    fn test_bank_account_token_rejects_bad_country() {
        let err = TokenRoutes
            .create_bank_account_token("12345", "usa", Currency::Usd, &BankAccountTokenParams::default())
            .unwrap_err();
        assert_eq!(err.param(), Some("bank_account[country]"));
    }

    #[test]
    fn test_pii_token() {
        let request = TokenRoutes.create_pii_token("000000000").unwrap();
        assert_eq!(
            request.form_pairs(),
            pairs(&[("pii[personal_id_number]", "000000000")])
        );
        assert!(TokenRoutes.create_pii_token(" ").is_err());
    }

    #[test]
    fn test_customer_token() {
        let request = TokenRoutes
            .create_customer_token("cus_1", Some("acct_9"))
            .unwrap();
        assert_eq!(request.form_pairs(), pairs(&[("customer", "cus_1")]));
        assert_eq!(request.header(ACCOUNT_HEADER), Some("acct_9"));

        let err = TokenRoutes
            .create_customer_token("cus_1", Some(""))
            .unwrap_err();
        assert_eq!(err.param(), Some("on_account"));
    }

    #[test]
    fn test_retrieve() {
        let request = TokenRoutes.retrieve("tok_visa").unwrap();
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/v1/tokens/tok_visa");
        assert_eq!(request.body(), None);

        assert!(TokenRoutes.retrieve("tok/../charges").is_err());
    }
}
