//! Status vocabularies and their outcome categories.

use std::fmt;

use serde::Deserialize;

/// Payment status as sent in payment and marketplace notifications.
///
/// Values outside the known vocabulary decode to [`Unknown`](Self::Unknown)
/// with the raw string kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PaymentStatus {
    /// `ok`
    Ok,
    /// `failed`
    Failed,
    /// `canceled`
    Canceled,
    /// `pending`
    Pending,
    /// `to_approve`: held until the merchant or payer approves.
    ToApprove,
    /// Anything else.
    Unknown(String),
}

impl PaymentStatus {
    /// Wire value of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "ok",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Pending => "pending",
            Self::ToApprove => "to_approve",
            Self::Unknown(raw) => raw,
        }
    }

    /// Maps this status to its outcome category.
    #[must_use]
    pub const fn outcome(&self) -> PaymentOutcome {
        match self {
            Self::Ok => PaymentOutcome::Succeeded,
            Self::Failed | Self::Canceled => PaymentOutcome::FailedOrCanceled,
            Self::Pending => PaymentOutcome::Pending {
                awaiting_approval: false,
            },
            Self::ToApprove => PaymentOutcome::Pending {
                awaiting_approval: true,
            },
            Self::Unknown(_) => PaymentOutcome::Unrecognized,
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ok" => Self::Ok,
            "failed" => Self::Failed,
            "canceled" => Self::Canceled,
            "pending" => Self::Pending,
            "to_approve" => Self::ToApprove,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome category of a payment (or marketplace sub-transaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentOutcome {
    /// Money was taken.
    Succeeded,
    /// The payment failed or was canceled; nothing was taken.
    FailedOrCanceled,
    /// Not final yet.
    Pending {
        /// True for `to_approve`.
        awaiting_approval: bool,
    },
    /// The status is not in the known vocabulary. Log it and do not act.
    Unrecognized,
}

impl PaymentOutcome {
    /// Returns true for outcomes that will not change.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Succeeded | Self::FailedOrCanceled)
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Succeeded => "succeeded",
            Self::FailedOrCanceled => "failed or canceled",
            Self::Pending {
                awaiting_approval: false,
            } => "pending",
            Self::Pending {
                awaiting_approval: true,
            } => "pending (awaiting approval)",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(label)
    }
}

/// Result code of a tokenization notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum TokenizationCode {
    /// `1`
    Success,
    /// `2`: the same tokenization was already submitted.
    Duplicate,
    /// `9`: rejected; see the notification's reason code.
    Rejected,
    /// Any other code.
    Unknown(i64),
}

impl TokenizationCode {
    /// Wire value of this code.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Success => 1,
            Self::Duplicate => 2,
            Self::Rejected => 9,
            Self::Unknown(code) => code,
        }
    }
}

impl Default for TokenizationCode {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl From<i64> for TokenizationCode {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Success,
            2 => Self::Duplicate,
            9 => Self::Rejected,
            other => Self::Unknown(other),
        }
    }
}

/// Outcome category of a tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenizationOutcome {
    /// The card or wallet was tokenized.
    Succeeded,
    /// A duplicate submission; the earlier one stands.
    Duplicate,
    /// The gateway refused, with its reason code.
    Rejected {
        /// Gateway reason code, empty if none was sent
        reason_code: String,
    },
    /// The code is not in the known vocabulary. Log it and do not act.
    Unrecognized(i64),
}

impl fmt::Display for TokenizationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Duplicate => f.write_str("duplicate"),
            Self::Rejected { reason_code } => write!(f, "rejected (reason {reason_code})"),
            Self::Unrecognized(code) => write!(f, "unrecognized (code {code})"),
        }
    }
}
