//! Terminal output
//!
//! Every command result is either pretty JSON or a short coloured summary.

use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use stripe_api_client::ApiError;
use stripe_api_client::models::{
    Charge, Customer, DeletedObject, List, PaymentSource, Refund, Token,
};
use stripe_core::Currency;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Text summary of a decoded object
pub trait Render {
    /// Print the summary to stdout
    fn render(&self);
}

/// Print `value` in the requested format
pub fn emit<T: Serialize + Render>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => value.render(),
    }
    Ok(())
}

/// Print a failure to stderr
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let Some(api) = err.downcast_ref::<ApiError>() else {
        return;
    };
    if let Some(details) = api.details() {
        if let Some(code) = &details.code {
            eprintln!("  {} {}", "code:".dimmed(), code);
        }
        if let Some(decline) = &details.decline_code {
            eprintln!("  {} {}", "decline code:".dimmed(), decline.yellow());
        }
    }
    if let Some(param) = api.param() {
        eprintln!("  {} {}", "param:".dimmed(), param);
    }
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{label}:").dimmed(), value);
}

fn optional(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

/// Format a minor-unit amount for display, e.g. `10.00 USD` or `500 JPY`
pub fn format_amount(amount: i64, currency: Option<Currency>) -> String {
    let Some(currency) = currency else {
        return amount.to_string();
    };
    let code = currency.code().to_uppercase();
    if currency.is_zero_decimal() {
        format!("{amount} {code}")
    } else {
        let sign = if amount < 0 { "-" } else { "" };
        let abs = amount.unsigned_abs();
        format!("{sign}{}.{:02} {code}", abs / 100, abs % 100)
    }
}

fn source_summary(source: &PaymentSource) -> String {
    match source {
        PaymentSource::Card(card) => format!("{} ending {}", card.brand, card.last4),
        PaymentSource::BankAccount(account) => {
            format!(
                "{} ending {}",
                account.bank_name.as_deref().unwrap_or("bank account"),
                account.last4
            )
        }
        PaymentSource::Unsupported { object } => format!("{object} (unsupported)"),
    }
}

impl Render for Token {
    fn render(&self) {
        println!("{} {}", "✓".green(), self.id.bold());
        field("type", self.kind);
        if let Some(card) = &self.card {
            field("card", format!("{} ending {}", card.brand, card.last4));
            field("expires", format!("{:02}/{}", card.exp_month, card.exp_year));
        }
        if let Some(account) = &self.bank_account {
            field("bank account", format!("ending {} ({})", account.last4, account.country));
        }
        if self.used == Some(true) {
            field("used", "yes".yellow());
        }
    }
}

impl Render for Charge {
    fn render(&self) {
        let status = self
            .status
            .map_or_else(|| "unknown".to_string(), |status| status.to_string());
        println!("{} {} {}", "✓".green(), self.id.bold(), status.dimmed());
        field("amount", format_amount(self.amount, Some(self.currency)));
        if self.amount_refunded.unwrap_or(0) > 0 {
            field("refundable", format_amount(self.refundable(), Some(self.currency)));
        }
        if self.captured == Some(false) {
            field("captured", "no".yellow());
        }
        optional("customer", self.customer.as_deref());
        optional("description", self.description.as_deref());
        if let Some(source) = &self.source {
            field("source", source_summary(source));
        }
        if let Some(message) = &self.failure_message {
            field("failure", message.red());
        }
    }
}

impl Render for Refund {
    fn render(&self) {
        println!("{} {}", "✓".green(), self.id.bold());
        field("amount", format_amount(self.amount, self.currency));
        optional("charge", self.charge.as_deref());
        if let Some(reason) = self.reason {
            field("reason", reason);
        }
        if let Some(status) = self.status {
            field("status", status);
        }
    }
}

impl Render for Customer {
    fn render(&self) {
        println!("{} {}", "✓".green(), self.id.bold());
        optional("email", self.email.as_deref());
        optional("description", self.description.as_deref());
        if let Some(balance) = self.account_balance.filter(|b| *b != 0) {
            field("balance", format_amount(balance, self.currency));
        }
        if let Some(source) = self.default_payment_source() {
            field("default source", source_summary(source));
        }
    }
}

impl Render for DeletedObject {
    fn render(&self) {
        if self.deleted {
            println!("{} {} deleted", "✓".green(), self.id.bold());
        } else {
            println!("{} {} not deleted", "✗".red(), self.id.bold());
        }
    }
}

impl<T: Render> Render for List<T> {
    fn render(&self) {
        for item in &self.items {
            item.render();
        }
        let more = if self.has_more {
            " (more available)".yellow().to_string()
        } else {
            String::new()
        };
        println!("{}{more}", format!("{} shown", self.len()).dimmed());
    }
}
