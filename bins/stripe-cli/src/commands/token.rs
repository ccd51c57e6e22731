//! Token commands

use crate::output::{OutputFormat, emit};
use anyhow::Result;
use clap::Subcommand;
use stripe_api_client::StripeClient;
use stripe_api_client::endpoints::{BankAccountTokenParams, CardTokenParams};
use stripe_api_client::models::AccountHolderType;
use stripe_core::Currency;

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Tokenize a card
    Card {
        /// Card number; spaces and hyphens are ignored
        number: String,

        /// Expiration month (1-12)
        #[arg(long)]
        exp_month: u32,

        /// Expiration year (two or four digits)
        #[arg(long)]
        exp_year: u32,

        /// Card security code
        #[arg(long)]
        cvc: String,

        /// Cardholder name
        #[arg(long)]
        name: Option<String>,

        /// Payout currency for connected-account debit cards
        #[arg(long)]
        currency: Option<Currency>,

        /// Connected account to act on behalf of
        #[arg(long)]
        account: Option<String>,
    },

    /// Tokenize a bank account
    BankAccount {
        /// Account number or IBAN
        account_number: String,

        /// Bank country (ISO 3166-1 alpha-2)
        #[arg(long)]
        country: String,

        /// Account currency
        #[arg(long)]
        currency: Currency,

        /// Routing number or sort code
        #[arg(long)]
        routing_number: Option<String>,

        /// Account holder name
        #[arg(long)]
        holder_name: Option<String>,

        /// Account holder type (individual, company)
        #[arg(long)]
        holder_type: Option<AccountHolderType>,

        /// Connected account to act on behalf of
        #[arg(long)]
        account: Option<String>,
    },

    /// Retrieve a token
    Retrieve {
        /// Token identifier
        token: String,
    },
}

/// Run a token command
pub async fn run(command: TokenCommand, client: &StripeClient, format: OutputFormat) -> Result<()> {
    let routes = client.tokens();
    let request = match command {
        TokenCommand::Card {
            number,
            exp_month,
            exp_year,
            cvc,
            name,
            currency,
            account,
        } => {
            let params = CardTokenParams {
                name,
                currency,
                on_account: account,
            };
            routes.create_card_token(&number, exp_month, exp_year, &cvc, &params)?
        }
        TokenCommand::BankAccount {
            account_number,
            country,
            currency,
            routing_number,
            holder_name,
            holder_type,
            account,
        } => {
            let params = BankAccountTokenParams {
                routing_number,
                account_holder_name: holder_name,
                account_holder_type: holder_type,
                on_account: account,
            };
            routes.create_bank_account_token(&account_number, &country, currency, &params)?
        }
        TokenCommand::Retrieve { token } => routes.retrieve(&token)?,
    };

    let token = request.send(client).await?;
    emit(&token, format)
}
