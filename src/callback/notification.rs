//! Notification payloads posted by the gateway.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::{PaymentOutcome, PaymentStatus, TokenizationCode, TokenizationOutcome};

/// Error decoding a notification body.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The body is not valid JSON for the expected shape.
    #[error("Failed to decode {kind} notification: {source}")]
    Decode {
        /// Shape that was expected
        kind: CallbackKind,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Unknown notification kind name.
    #[error("Unknown callback kind '{0}': expected payment, tokenization, or marketplace")]
    UnknownKind(String),
}

/// Which notification shape a callback endpoint receives.
///
/// The gateway does not tag notifications, so the receiving route decides
/// the shape (one callback URL per kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// Simple payment.
    Payment,
    /// Card or wallet tokenization.
    Tokenization,
    /// Marketplace (split) payment.
    Marketplace,
}

impl CallbackKind {
    /// Lower-case name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Tokenization => "tokenization",
            Self::Marketplace => "marketplace",
        }
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallbackKind {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "payment" => Ok(Self::Payment),
            "tokenization" => Ok(Self::Tokenization),
            "marketplace" => Ok(Self::Marketplace),
            _ => Err(CallbackError::UnknownKind(s.to_string())),
        }
    }
}

/// Notification about a simple payment.
///
/// Every field defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentNotification {
    #[serde(rename = "orderId", deserialize_with = "null_as_default")]
    pub order_id: String,
    #[serde(rename = "transactionId", deserialize_with = "null_as_default")]
    pub transaction_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PaymentStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_type: String,
}

impl PaymentNotification {
    /// Classifies this notification.
    #[must_use]
    pub const fn outcome(&self) -> PaymentOutcome {
        self.status.outcome()
    }
}

/// Notification about a tokenization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenizationNotification {
    #[serde(deserialize_with = "null_as_default")]
    pub code: TokenizationCode,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reason_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: TokenizationPayload,
}

/// Transaction details nested in a tokenization notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenizationPayload {
    #[serde(rename = "transactionId", deserialize_with = "null_as_default")]
    pub transaction_id: i64,
    #[serde(rename = "orderId", deserialize_with = "null_as_default")]
    pub order_id: String,
    /// The issued card/wallet token.
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_type: String,
}

impl TokenizationNotification {
    /// Classifies this notification. A rejection carries the reason code.
    #[must_use]
    pub fn outcome(&self) -> TokenizationOutcome {
        match self.code {
            TokenizationCode::Success => TokenizationOutcome::Succeeded,
            TokenizationCode::Duplicate => TokenizationOutcome::Duplicate,
            TokenizationCode::Rejected => TokenizationOutcome::Rejected {
                reason_code: self.reason_code.clone(),
            },
            TokenizationCode::Unknown(code) => TokenizationOutcome::Unrecognized(code),
        }
    }
}

/// Notification about a marketplace (split) payment.
///
/// The parent status is classified on its own; sub-transaction statuses are
/// exposed separately and never folded into it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketplaceNotification {
    #[serde(rename = "orderId", deserialize_with = "null_as_default")]
    pub order_id: String,
    #[serde(rename = "transactionId", deserialize_with = "null_as_default")]
    pub transaction_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PaymentStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_transactions: Vec<SubTransaction>,
}

impl MarketplaceNotification {
    /// Classifies the parent payment.
    #[must_use]
    pub const fn outcome(&self) -> PaymentOutcome {
        self.status.outcome()
    }

    /// Classifies each partner sub-transaction, in notification order.
    pub fn sub_outcomes(&self) -> impl Iterator<Item = (&SubTransaction, PaymentOutcome)> {
        self.sub_transactions.iter().map(|sub| (sub, sub.outcome()))
    }
}

/// One partner terminal's share of a marketplace payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubTransaction {
    #[serde(deserialize_with = "null_as_default")]
    pub terminal_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PaymentStatus,
}

impl SubTransaction {
    /// Classifies this sub-transaction with the payment vocabulary.
    #[must_use]
    pub const fn outcome(&self) -> PaymentOutcome {
        self.status.outcome()
    }
}

/// Decodes an explicit JSON `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A decoded notification of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    Payment(PaymentNotification),
    Tokenization(TokenizationNotification),
    Marketplace(MarketplaceNotification),
}

impl Callback {
    /// Decodes `body` as the shape for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CallbackError::Decode`] if the body is not valid JSON for that shape.
    pub fn decode(kind: CallbackKind, body: &[u8]) -> Result<Self, CallbackError> {
        let decode_err = |source| CallbackError::Decode { kind, source };
        let callback = match kind {
            CallbackKind::Payment => Self::Payment(serde_json::from_slice(body).map_err(decode_err)?),
            CallbackKind::Tokenization => {
                Self::Tokenization(serde_json::from_slice(body).map_err(decode_err)?)
            }
            CallbackKind::Marketplace => {
                Self::Marketplace(serde_json::from_slice(body).map_err(decode_err)?)
            }
        };
        Ok(callback)
    }

    /// Kind of this notification.
    #[must_use]
    pub const fn kind(&self) -> CallbackKind {
        match self {
            Self::Payment(_) => CallbackKind::Payment,
            Self::Tokenization(_) => CallbackKind::Tokenization,
            Self::Marketplace(_) => CallbackKind::Marketplace,
        }
    }

    /// Merchant order id the notification refers to.
    #[must_use]
    pub fn order_id(&self) -> &str {
        match self {
            Self::Payment(n) => &n.order_id,
            Self::Tokenization(n) => &n.payload.order_id,
            Self::Marketplace(n) => &n.order_id,
        }
    }

    /// Returns true if the status/code is outside the known vocabulary.
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        match self {
            Self::Payment(n) => matches!(n.outcome(), PaymentOutcome::Unrecognized),
            Self::Tokenization(n) => matches!(n.code, TokenizationCode::Unknown(_)),
            Self::Marketplace(n) => matches!(n.outcome(), PaymentOutcome::Unrecognized),
        }
    }
}
