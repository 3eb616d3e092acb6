//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::callback::CallbackKind;
use crate::operations::DeliveryTransaction;

/// Alif payment gateway client
///
/// Initiates payments, tokenizations and marketplace payments, confirms
/// deliveries, and interprets stored callback bodies.
#[derive(Debug, Parser)]
#[command(name = "alif-pay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Gateway base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Terminal id issued by the gateway
    #[arg(long = "terminal-id", global = true)]
    pub terminal_id: Option<String>,

    /// Terminal secret (prefer the environment variable over the flag)
    #[arg(
        long = "terminal-secret",
        env = "ALIF_TERMINAL_SECRET",
        hide_env_values = true,
        global = true
    )]
    pub terminal_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for alif-pay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "alif-pay.toml")]
        output: PathBuf,
    },

    /// Initiate a payment
    Pay(PayArgs),

    /// Initiate tokenization of a card or wallet
    Tokenize(TokenizeArgs),

    /// Initiate a marketplace (split) payment from a JSON request file
    Marketplace {
        /// Gate name (korti_milli, vsa, mcr, salom)
        #[arg(long)]
        gate: String,

        /// Path to a JSON marketplace payment request
        #[arg(long)]
        request: PathBuf,
    },

    /// Confirm delivery of a held payment
    ConfirmDelivery {
        /// Gateway transaction id
        #[arg(long = "transaction-id")]
        transaction_id: String,

        /// Amount to capture
        #[arg(long)]
        amount: String,
    },

    /// Confirm delivery of a Visa/Mastercard marketplace payment
    ConfirmCardDelivery {
        /// Parent transaction id
        #[arg(long = "parent-transaction-id")]
        parent_transaction_id: String,

        /// Sub-transaction to confirm (can be specified multiple times)
        #[arg(long = "extra", value_name = "TXN=AMOUNT", value_parser = parse_delivery_transaction)]
        extra: Vec<DeliveryTransaction>,
    },

    /// Print the token for the terminal id followed by FIELDS
    Sign {
        /// Field values, in signing order
        fields: Vec<String>,
    },

    /// Classify a stored callback body
    Classify {
        /// Notification shape
        #[arg(long, value_enum)]
        kind: CallbackKindArg,

        /// File containing the callback body
        file: PathBuf,
    },
}

/// Arguments for `pay`.
#[derive(Debug, Args)]
pub struct PayArgs {
    /// Merchant order id
    #[arg(long = "order-id")]
    pub order_id: String,

    /// Amount as a decimal string, e.g. 10.00
    #[arg(long)]
    pub amount: String,

    /// URL the gateway posts the payment notification to
    #[arg(long = "callback-url")]
    pub callback_url: String,

    /// URL the payer returns to
    #[arg(long = "return-url")]
    pub return_url: String,

    /// Gate name (korti_milli, wallet, salom, invoice, vsa, mcr, cybersource_checkout)
    #[arg(long)]
    pub gate: Option<String>,

    /// Payer email
    #[arg(long)]
    pub email: Option<String>,

    /// Payer phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Order description
    #[arg(long)]
    pub info: Option<String>,

    /// Payment deadline for the invoice gate
    #[arg(long)]
    pub deadline: Option<String>,
}

/// Arguments for `tokenize`.
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Merchant order id
    #[arg(long = "order-id")]
    pub order_id: String,

    /// Customer phone
    #[arg(long)]
    pub phone: String,

    /// Tokenization gate (e.g. tokenization_korti_milli)
    #[arg(long)]
    pub gate: String,

    /// Merchant-side customer id
    #[arg(long = "client-id")]
    pub client_id: String,

    /// URL the gateway posts the tokenization notification to
    #[arg(long = "callback-url")]
    pub callback_url: String,

    /// URL the customer returns to
    #[arg(long = "return-url")]
    pub return_url: String,
}

/// Callback kind argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CallbackKindArg {
    /// Simple payment notification
    Payment,
    /// Tokenization notification
    Tokenization,
    /// Marketplace payment notification
    Marketplace,
}

impl From<CallbackKindArg> for CallbackKind {
    fn from(arg: CallbackKindArg) -> Self {
        match arg {
            CallbackKindArg::Payment => Self::Payment,
            CallbackKindArg::Tokenization => Self::Tokenization,
            CallbackKindArg::Marketplace => Self::Marketplace,
        }
    }
}

fn parse_delivery_transaction(s: &str) -> Result<DeliveryTransaction, String> {
    let (transaction_id, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TXN=AMOUNT, got '{s}'"))?;
    let (transaction_id, amount) = (transaction_id.trim(), amount.trim());
    if transaction_id.is_empty() || amount.is_empty() {
        return Err(format!("expected TXN=AMOUNT, got '{s}'"));
    }
    Ok(DeliveryTransaction {
        transaction_id: transaction_id.to_string(),
        amount: amount.to_string(),
    })
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Like [`parse_from_iter`](Self::parse_from_iter) but returns parse errors.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
