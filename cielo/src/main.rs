#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use args::{Args, Command};
use cielo_client::{Card, CieloEcommerce, Sale};
use cielo_config::ClientConfig;
use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Masking is offline and needs no credentials
    if matches!(args.command, Command::Mask) {
        let input = read_input(None)?;
        return print(&cielo_client::mask_sensitive_card_data(&input));
    }

    // Load configuration
    let config = ClientConfig::load(&args.config)?;

    // Initialize telemetry
    cielo_telemetry::init(&config.logging)?;

    tracing::debug!(
        config_path = %args.config.display(),
        command = args.command.name(),
        "running cielo command"
    );

    let client = CieloEcommerce::from_config(&config);
    let name = args.command.name();

    let output = run(&client, args.command)
        .await
        .with_context(|| format!("{name} failed"))?;

    print(&output)
}

/// Execute one API call and render its result as pretty JSON
async fn run(client: &CieloEcommerce, command: Command) -> anyhow::Result<String> {
    match command {
        Command::CreateSale { input } => {
            let sale: Sale = read_json(input.as_deref())?;
            to_json(&client.create_sale(&sale).await?)
        }
        Command::QuerySale { payment_id } => to_json(&client.query_sale(&payment_id).await?),
        Command::QueryRecurrentSale { recurrent_payment_id } => {
            to_json(&client.query_recurrent_sale(&recurrent_payment_id).await?)
        }
        Command::QueryCardToken { card_token } => to_json(&client.query_card_token(&card_token).await?),
        Command::DeactivateRecurrentSale { recurrent_payment_id } => {
            client.deactivate_recurrent_sale(&recurrent_payment_id).await?;
            to_json(&serde_json::json!({ "RecurrentPaymentId": recurrent_payment_id, "Deactivated": true }))
        }
        Command::CaptureSale {
            payment_id,
            amount,
            service_tax_amount,
        } => to_json(&client.capture_sale(&payment_id, amount, service_tax_amount).await?),
        Command::CancelSale { payment_id, amount } => to_json(&client.cancel_sale(&payment_id, amount).await?),
        Command::CreateCardToken { input } => {
            let card: Card = read_json(input.as_deref())?;
            to_json(&client.create_card_token(&card).await?)
        }
        Command::Mask => anyhow::bail!("mask does not call the API"),
    }
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}

fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("invalid JSON payload")
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to render response")
}

fn print(output: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end_matches('\n')).context("failed to write to stdout")
}
