//! Command execution logic.
//!
//! Each subcommand maps to one gateway operation, to local signing, or to
//! callback classification. Commands return the text to print on stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

use alif_pay::callback::{Callback, CallbackError, CallbackKind};
use alif_pay::config::{Command, PayArgs, TokenizeArgs, ValidatedConfig};
use alif_pay::operations::{
    CardDeliveryConfirmationRequest, DeliveryConfirmationRequest, DeliveryTransaction,
    GatewayClient, MarketplacePaymentRequest, PaymentRequest, TokenizationRequest,
};
use alif_pay::transport::{GatewayError, HttpClient, ResponseEnvelope};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The gateway call failed or was rejected.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A callback body did not decode.
    #[error(transparent)]
    Callback(#[from] CallbackError),

    /// Failed to read an input file.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadFile {
        /// Path to the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An input file is not a valid request.
    #[error("Invalid request in '{}': {source}", path.display())]
    InvalidRequest {
        /// Path to the input file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The command cannot run through the gateway client.
    #[error("Command does not use the gateway")]
    NotAGatewayCommand,
}

/// Executes a gateway command with the validated configuration.
///
/// # Errors
///
/// Returns an error if an input file is invalid or the gateway call fails.
pub async fn execute(command: Command, config: ValidatedConfig) -> Result<String, RunError> {
    let client =
        GatewayClient::new(config.base_url, config.credentials).with_timeout(config.timeout);
    execute_with(&client, command).await
}

/// Executes a gateway command against an arbitrary HTTP client.
async fn execute_with<H: HttpClient>(
    client: &GatewayClient<H>,
    command: Command,
) -> Result<String, RunError> {
    let envelope = match command {
        Command::Pay(args) => client.initiate_payment(&payment_request(args)).await?,
        Command::Tokenize(args) => {
            client
                .initiate_tokenization(&tokenization_request(args))
                .await?
        }
        Command::Marketplace { gate, request } => {
            let request = read_marketplace_request(&request)?;
            client.initiate_marketplace_payment(&request, &gate).await?
        }
        Command::ConfirmDelivery {
            transaction_id,
            amount,
        } => {
            client
                .confirm_delivery(&DeliveryConfirmationRequest {
                    transaction_id,
                    amount,
                })
                .await?
        }
        Command::ConfirmCardDelivery {
            parent_transaction_id,
            extra,
        } => {
            client
                .confirm_card_delivery(&card_delivery_request(parent_transaction_id, extra))
                .await?
        }
        Command::Sign { fields } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            return Ok(client.signer().sign_fields(&fields).into_string());
        }
        Command::Init { .. } | Command::Classify { .. } => {
            return Err(RunError::NotAGatewayCommand);
        }
    };

    tracing::info!(code = envelope.code, "Gateway accepted request");
    Ok(render_envelope(&envelope))
}

/// Decodes and classifies a stored callback body.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode as `kind`.
pub fn classify_file(kind: CallbackKind, path: &Path) -> Result<String, RunError> {
    let body = std::fs::read(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let callback = Callback::decode(kind, &body)?;

    if callback.is_unrecognized() {
        tracing::warn!(%kind, order_id = callback.order_id(), "Unrecognized callback status");
    }
    Ok(describe(&callback))
}

fn payment_request(args: PayArgs) -> PaymentRequest {
    PaymentRequest {
        email: args.email,
        phone: args.phone,
        info: args.info,
        gate: args.gate,
        deadline: args.deadline,
        ..PaymentRequest::new(
            args.order_id,
            args.amount,
            args.callback_url,
            args.return_url,
        )
    }
}

fn tokenization_request(args: TokenizeArgs) -> TokenizationRequest {
    TokenizationRequest {
        order_id: args.order_id,
        callback_url: args.callback_url,
        return_url: args.return_url,
        phone: args.phone,
        gate: args.gate,
        client_id: args.client_id,
    }
}

fn card_delivery_request(
    parent_transaction_id: String,
    extra: Vec<DeliveryTransaction>,
) -> CardDeliveryConfirmationRequest {
    CardDeliveryConfirmationRequest {
        parent_transaction_id,
        extra,
    }
}

fn read_marketplace_request(path: &Path) -> Result<MarketplacePaymentRequest, RunError> {
    let content = std::fs::read(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| RunError::InvalidRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn render_envelope(envelope: &ResponseEnvelope) -> String {
    if envelope.url.is_empty() {
        format!("{} {}", envelope.code, envelope.message)
    } else {
        format!("{} {}\n{}", envelope.code, envelope.message, envelope.url)
    }
}

fn describe(callback: &Callback) -> String {
    let mut out = String::new();
    match callback {
        Callback::Payment(n) => {
            let _ = write!(
                out,
                "payment {}: {} (status '{}')",
                n.order_id,
                n.outcome(),
                n.status
            );
        }
        Callback::Tokenization(n) => {
            let _ = write!(
                out,
                "tokenization {}: {} (code {})",
                n.payload.order_id,
                n.outcome(),
                n.code.as_i64()
            );
        }
        Callback::Marketplace(n) => {
            let _ = write!(
                out,
                "marketplace {}: {} (status '{}')",
                n.order_id,
                n.outcome(),
                n.status
            );
            for (sub, outcome) in n.sub_outcomes() {
                let _ = write!(
                    out,
                    "\n  {} {}: {} (status '{}')",
                    sub.terminal_id, sub.transaction_id, outcome, sub.status
                );
            }
        }
    }
    out
}
