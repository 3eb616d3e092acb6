//! Request payloads.
//!
//! These carry business fields only. The terminal id (`key`) and the
//! request `token` are added by [`GatewayClient`](super::GatewayClient)
//! when the request is sent. Optional fields are omitted from the JSON
//! when `None`.

use serde::{Deserialize, Serialize};

use crate::signing::Token;

/// Standard payment, or payment through an external gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Merchant order id.
    pub order_id: String,
    /// Amount as a decimal string (signed exactly as written).
    pub amount: String,
    /// Where the gateway posts the payment notification.
    pub callback_url: String,
    /// Where the payer is sent after paying.
    pub return_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-text order description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Gate name, also sent as the `gate` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    /// Payment deadline for cash payments through the invoice gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Line items. Mandatory when enabled in the terminal settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Invoices>,
}

impl PaymentRequest {
    /// Creates a payment with the mandatory fields set.
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        amount: impl Into<String>,
        callback_url: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount: amount.into(),
            callback_url: callback_url.into(),
            return_url: return_url.into(),
            ..Self::default()
        }
    }

    /// Sets the gate.
    #[must_use]
    pub fn with_gate(mut self, gate: impl Into<String>) -> Self {
        self.gate = Some(gate.into());
        self
    }

    /// Sets the line items.
    #[must_use]
    pub fn with_invoices(mut self, invoices: Vec<Invoice>) -> Self {
        self.invoices = Some(Invoices { invoices });
        self
    }
}

/// Wrapper the gateway expects around payment line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoices {
    pub invoices: Vec<Invoice>,
}

/// A single payment line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub vat_percent: String,
}

/// Tokenization of a card or wallet for later charges.
///
/// Sent wrapped in a `data` object with camel-case keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizationRequest {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
    /// Signed together with `gate`.
    pub phone: String,
    /// Tokenization gate, e.g. [`gate::tokenization::WALLET`](super::gate::tokenization::WALLET).
    pub gate: String,
    /// Merchant-side customer id.
    #[serde(rename = "clientID")]
    pub client_id: String,
}

/// Payment split across partner terminals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplacePaymentRequest {
    pub order_id: String,
    /// Total amount of all splits.
    pub amount: String,
    pub callback_url: String,
    pub return_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// One entry per partner terminal receiving part of the payment.
    #[serde(rename = "mpTerminalInfo")]
    pub mp_terminal_info: Vec<MpTerminalInfo>,
}

/// The share of a marketplace payment going to one partner terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpTerminalInfo {
    pub terminal_id: String,
    pub amount: String,
    /// Payout condition configured with the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_id: Option<u32>,
    pub invoices: Vec<MarketplaceInvoice>,
}

/// A marketplace line item (no VAT field, unlike [`Invoice`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceInvoice {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
}

/// Delivery confirmation for a held payment (every method except Visa/Mastercard).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfirmationRequest {
    pub transaction_id: String,
    pub amount: String,
}

/// Delivery confirmation for a Visa/Mastercard marketplace payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDeliveryConfirmationRequest {
    pub parent_transaction_id: String,
    /// Sub-transactions being confirmed.
    pub extra: Vec<DeliveryTransaction>,
}

/// One sub-transaction to confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTransaction {
    pub transaction_id: String,
    pub amount: String,
}

/// A request body with the terminal id and token injected at top level.
#[derive(Debug, Serialize)]
pub(super) struct Signed<'a, T> {
    pub key: &'a str,
    pub token: &'a Token,
    #[serde(flatten)]
    pub request: &'a T,
}

/// Tokenization body: the signed request nested under `data`.
#[derive(Debug, Serialize)]
pub(super) struct TokenizationBody<'a> {
    pub data: Signed<'a, TokenizationRequest>,
}
