use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cielo e-commerce client
#[derive(Debug, Parser)]
#[command(name = "cielo", about = "Query and manage Cielo e-commerce payments")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "cielo.toml", env = "CIELO_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a sale from a JSON `Sale` payload
    CreateSale {
        /// File holding the payload; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Fetch a sale by payment id
    QuerySale { payment_id: String },

    /// Fetch a recurring payment by its id
    QueryRecurrentSale { recurrent_payment_id: String },

    /// Fetch the masked card behind a token
    QueryCardToken { card_token: String },

    /// Stop a recurring payment
    DeactivateRecurrentSale { recurrent_payment_id: String },

    /// Capture an authorized sale
    CaptureSale {
        payment_id: String,

        /// Amount in cents; captures the full amount when omitted
        #[arg(long)]
        amount: Option<u64>,

        /// Service tax in cents
        #[arg(long)]
        service_tax_amount: Option<u64>,
    },

    /// Cancel a sale
    CancelSale {
        payment_id: String,

        /// Amount in cents; cancels the full amount when omitted
        #[arg(long)]
        amount: Option<u64>,
    },

    /// Tokenize a card from a JSON `Card` payload
    CreateCardToken {
        /// File holding the payload; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Mask card data in text read from stdin
    Mask,
}

impl Command {
    /// Subcommand name as typed on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateSale { .. } => "create-sale",
            Self::QuerySale { .. } => "query-sale",
            Self::QueryRecurrentSale { .. } => "query-recurrent-sale",
            Self::QueryCardToken { .. } => "query-card-token",
            Self::DeactivateRecurrentSale { .. } => "deactivate-recurrent-sale",
            Self::CaptureSale { .. } => "capture-sale",
            Self::CancelSale { .. } => "cancel-sale",
            Self::CreateCardToken { .. } => "create-card-token",
            Self::Mask => "mask",
        }
    }
}
