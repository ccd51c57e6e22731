//! Customer commands

use super::{PageArgs, metadata, parse_key_val};
use crate::output::{OutputFormat, emit};
use anyhow::Result;
use clap::Subcommand;
use stripe_api_client::StripeClient;
use stripe_api_client::endpoints::CustomerParams;

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    /// Create a customer
    Create {
        /// Customer email
        #[arg(long)]
        email: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Token to attach as the default source
        #[arg(long)]
        source: Option<String>,

        /// Metadata entry, repeatable
        #[arg(short, long = "metadata", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,
    },

    /// Retrieve a customer
    Retrieve {
        /// Customer identifier
        customer: String,
    },

    /// Permanently delete a customer
    Delete {
        /// Customer identifier
        customer: String,
    },

    /// List customers
    List {
        /// Only customers with this exact email
        #[arg(long)]
        email: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Run a customer command
pub async fn run(
    command: CustomerCommand,
    client: &StripeClient,
    format: OutputFormat,
) -> Result<()> {
    let routes = client.customers();
    match command {
        CustomerCommand::Create {
            email,
            description,
            source,
            metadata: pairs,
        } => {
            let params = CustomerParams {
                email,
                description,
                source,
                metadata: metadata(pairs),
                ..CustomerParams::default()
            };
            emit(&routes.create(&params)?.send(client).await?, format)
        }
        CustomerCommand::Retrieve { customer } => {
            emit(&routes.retrieve(&customer)?.send(client).await?, format)
        }
        CustomerCommand::Delete { customer } => {
            emit(&routes.delete(&customer)?.send(client).await?, format)
        }
        CustomerCommand::List { email, page } => {
            let request = routes.list(&page.to_params(), email.as_deref())?;
            emit(&request.send(client).await?, format)
        }
    }
}
