//! Refund commands

use super::{PageArgs, metadata, parse_key_val};
use crate::output::{OutputFormat, emit};
use anyhow::{Result, bail};
use clap::Subcommand;
use stripe_api_client::StripeClient;
use stripe_api_client::endpoints::CreateRefundParams;
use stripe_api_client::models::RefundReason;

#[derive(Debug, Subcommand)]
pub enum RefundCommand {
    /// Refund all or part of a charge
    Create {
        /// Charge to refund
        charge: String,

        /// Amount in minor units; defaults to the full remaining amount
        #[arg(long)]
        amount: Option<i64>,

        /// Reason (duplicate, fraudulent, requested_by_customer)
        #[arg(long)]
        reason: Option<RefundReason>,

        /// Also refund the platform fee
        #[arg(long)]
        refund_application_fee: bool,

        /// Reverse the transfer to the destination account
        #[arg(long)]
        reverse_transfer: bool,

        /// Metadata entry, repeatable
        #[arg(short, long = "metadata", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,

        /// Idempotency key for safely retrying this command
        #[arg(long)]
        idempotency_key: Option<String>,
    },

    /// Retrieve a refund
    Retrieve {
        /// Refund identifier
        refund: String,
    },

    /// Set metadata on a refund
    Update {
        /// Refund identifier
        refund: String,

        /// Metadata entry, repeatable; an empty value removes the key
        #[arg(short, long = "metadata", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,
    },

    /// List refunds
    List {
        /// Only refunds of this charge
        #[arg(long)]
        charge: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Run a refund command
pub async fn run(command: RefundCommand, client: &StripeClient, format: OutputFormat) -> Result<()> {
    let routes = client.refunds();
    match command {
        RefundCommand::Create {
            charge,
            amount,
            reason,
            refund_application_fee,
            reverse_transfer,
            metadata: pairs,
            idempotency_key,
        } => {
            let params = CreateRefundParams {
                amount,
                reason,
                refund_application_fee: refund_application_fee.then_some(true),
                reverse_transfer: reverse_transfer.then_some(true),
                metadata: metadata(pairs),
            };
            let mut request = routes.create(&charge, &params)?;
            if let Some(key) = idempotency_key {
                request = request.with_idempotency_key(key)?;
            }
            emit(&request.send(client).await?, format)
        }
        RefundCommand::Retrieve { refund } => {
            emit(&routes.retrieve(&refund)?.send(client).await?, format)
        }
        RefundCommand::Update {
            refund,
            metadata: pairs,
        } => {
            let Some(metadata) = metadata(pairs) else {
                bail!("nothing to update; pass at least one --metadata key=value");
            };
            emit(&routes.update(&refund, &metadata)?.send(client).await?, format)
        }
        RefundCommand::List { charge, page } => {
            let request = routes.list(charge.as_deref(), &page.to_params())?;
            emit(&request.send(client).await?, format)
        }
    }
}
