//! Stripe CLI - tokens, charges, refunds and customers from the terminal
//!
//! Configuration comes from `STRIPE_SECRET_KEY` and friends, or from a TOML
//! file passed with `--config`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stripe_api_client::{ClientConfig, StripeClient};
use tracing::debug;

mod commands;
mod output;

use commands::{charge, customer, refund, token};
use output::OutputFormat;

/// Operator CLI for the Stripe payments API
#[derive(Parser)]
#[command(name = "stripe-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// TOML configuration file (overrides the environment)
    #[arg(short, long, global = true, env = "STRIPE_CLI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and inspect tokens
    Token {
        #[command(subcommand)]
        action: token::TokenCommand,
    },

    /// Create, capture and inspect charges
    Charge {
        #[command(subcommand)]
        action: charge::ChargeCommand,
    },

    /// Create, update and inspect refunds
    Refund {
        #[command(subcommand)]
        action: refund::RefundCommand,
    },

    /// Create, delete and inspect customers
    Customer {
        #[command(subcommand)]
        action: customer::CustomerCommand,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ClientConfig> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration file");
            ClientConfig::from_file(path)?
        }
        None => ClientConfig::from_env()?,
    };
    debug!(config = ?config, environment = ?config.environment(), "Configuration loaded");
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = StripeClient::with_config(load_config(cli.config.as_ref())?)?;

    match cli.command {
        Commands::Token { action } => token::run(action, &client, cli.format).await,
        Commands::Charge { action } => charge::run(action, &client, cli.format).await,
        Commands::Refund { action } => refund::run(action, &client, cli.format).await,
        Commands::Customer { action } => customer::run(action, &client, cli.format).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("stripe_cli=debug,stripe_api_client=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
