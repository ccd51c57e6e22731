//! Charge commands

use super::{PageArgs, metadata, parse_key_val};
use crate::output::{OutputFormat, emit};
use anyhow::Result;
use clap::Subcommand;
use stripe_api_client::StripeClient;
use stripe_api_client::endpoints::{CaptureChargeParams, CreateChargeParams};
use stripe_core::Currency;

#[derive(Debug, Subcommand)]
pub enum ChargeCommand {
    /// Create a charge
    Create {
        /// Amount in minor units (cents)
        amount: i64,

        /// Charge currency
        #[arg(long)]
        currency: Currency,

        /// Token or source to charge
        #[arg(long, required_unless_present = "customer")]
        source: Option<String>,

        /// Customer to charge
        #[arg(long)]
        customer: Option<String>,

        /// Charge description
        #[arg(long)]
        description: Option<String>,

        /// Statement descriptor (at most 22 characters)
        #[arg(long)]
        statement_descriptor: Option<String>,

        /// Address to send the receipt to
        #[arg(long)]
        receipt_email: Option<String>,

        /// Authorize only; capture later
        #[arg(long)]
        no_capture: bool,

        /// Metadata entry, repeatable
        #[arg(short, long = "metadata", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,

        /// Connected account to act on behalf of
        #[arg(long)]
        account: Option<String>,

        /// Idempotency key for safely retrying this command
        #[arg(long)]
        idempotency_key: Option<String>,
    },

    /// Retrieve a charge
    Retrieve {
        /// Charge identifier
        charge: String,
    },

    /// Capture an authorized charge
    Capture {
        /// Charge identifier
        charge: String,

        /// Amount to capture; defaults to the full amount
        #[arg(long)]
        amount: Option<i64>,
    },

    /// List charges
    List {
        /// Only charges for this customer
        #[arg(long)]
        customer: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Run a charge command
pub async fn run(command: ChargeCommand, client: &StripeClient, format: OutputFormat) -> Result<()> {
    let routes = client.charges();
    match command {
        ChargeCommand::Create {
            amount,
            currency,
            source,
            customer,
            description,
            statement_descriptor,
            receipt_email,
            no_capture,
            metadata: pairs,
            account,
            idempotency_key,
        } => {
            let params = CreateChargeParams {
                source,
                customer,
                description,
                statement_descriptor,
                receipt_email,
                capture: no_capture.then_some(false),
                metadata: metadata(pairs),
                on_account: account,
                ..CreateChargeParams::default()
            };
            let mut request = routes.create(amount, currency, &params)?;
            if let Some(key) = idempotency_key {
                request = request.with_idempotency_key(key)?;
            }
            emit(&request.send(client).await?, format)
        }
        ChargeCommand::Retrieve { charge } => {
            emit(&routes.retrieve(&charge)?.send(client).await?, format)
        }
        ChargeCommand::Capture { charge, amount } => {
            let params = CaptureChargeParams {
                amount,
                ..CaptureChargeParams::default()
            };
            emit(&routes.capture(&charge, &params)?.send(client).await?, format)
        }
        ChargeCommand::List { customer, page } => {
            let request = routes.list(&page.to_params(), customer.as_deref())?;
            emit(&request.send(client).await?, format)
        }
    }
}
