//! Argument handling and local failures; nothing here reaches the network

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("stripe-cli").unwrap();
    cmd.env_remove("STRIPE_SECRET_KEY")
        .env_remove("STRIPE_API_BASE")
        .env_remove("STRIPE_API_VERSION")
        .env_remove("STRIPE_TIMEOUT_SECS")
        .env_remove("STRIPE_CLI_CONFIG");
    cmd
}

/// Configured, but pointed at a port nothing listens on
fn offline_cli() -> Command {
    let mut cmd = cli();
    cmd.env("STRIPE_SECRET_KEY", "sk_test_cli")
        .env("STRIPE_API_BASE", "http://127.0.0.1:9");
    cmd
}

#[test]
fn test_help_lists_resources() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("token"))
        .stdout(predicate::str::contains("charge"))
        .stdout(predicate::str::contains("refund"))
        .stdout(predicate::str::contains("customer"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    cli().arg("payout").assert().failure().code(2);
}

#[test]
fn test_unknown_format_is_rejected() {
    cli()
        .args(["--format", "yaml", "token", "retrieve", "tok_1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn test_unknown_currency_is_rejected() {
    cli()
        .args(["charge", "create", "100", "--currency", "xyz", "--source", "tok_visa"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_charge_needs_source_or_customer() {
    cli()
        .args(["charge", "create", "100", "--currency", "usd"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--source"));
}

#[test]
fn test_missing_secret_key() {
    cli()
        .args(["token", "retrieve", "tok_1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("STRIPE_SECRET_KEY"));
}

#[test]
fn test_missing_config_file() {
    cli()
        .args(["--config", "/nonexistent/stripe.toml", "token", "retrieve", "tok_1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_validation_fails_before_network() {
    offline_cli()
        .args([
            "token", "card", "4242 4242 4242 4242", "--exp-month", "13", "--exp-year", "2030",
            "--cvc", "123",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("card[exp_month]"))
        .stderr(predicate::str::contains("4242424242424242").not());
}

#[test]
fn test_refund_update_requires_metadata() {
    offline_cli()
        .args(["refund", "update", "re_1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--metadata"));
}

#[test]
fn test_connection_failure_exits_one() {
    offline_cli()
        .args(["customer", "retrieve", "cus_1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("connection failed"));
}
