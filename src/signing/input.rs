//! Per-operation signing inputs.

/// The business fields signed for one request, in gateway-defined order.
///
/// Every token is computed over `terminal_id` followed by the variant's
/// fields, concatenated without separators. The terminal id always comes
/// from the [`Credentials`](super::Credentials) of the signing client, so it
/// is not part of any variant.
///
/// | Variant                    | Signed fields (after terminal id)      |
/// |----------------------------|----------------------------------------|
/// | `Payment`                  | order id, amount, callback URL         |
/// | `Tokenization`             | phone, gate                            |
/// | `MarketplacePayment`       | order id, amount, callback URL         |
/// | `DeliveryConfirmation`     | transaction id, amount                 |
/// | `CardDeliveryConfirmation` | parent transaction id                  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningInput<'a> {
    /// Standard payment or payment through an external gateway.
    Payment {
        /// Merchant order id
        order_id: &'a str,
        /// Amount exactly as sent in the request body
        amount: &'a str,
        /// Callback URL exactly as sent in the request body
        callback_url: &'a str,
    },
    /// Card or wallet tokenization.
    Tokenization {
        /// Customer phone number
        phone: &'a str,
        /// Tokenization gate name
        gate: &'a str,
    },
    /// Payment split across partner terminals.
    MarketplacePayment {
        /// Merchant order id
        order_id: &'a str,
        /// Total amount
        amount: &'a str,
        /// Callback URL
        callback_url: &'a str,
    },
    /// Delivery confirmation for a held payment.
    DeliveryConfirmation {
        /// Gateway transaction id
        transaction_id: &'a str,
        /// Amount to capture
        amount: &'a str,
    },
    /// Delivery confirmation for a Visa/Mastercard marketplace payment.
    CardDeliveryConfirmation {
        /// Parent (marketplace) transaction id
        parent_transaction_id: &'a str,
    },
}

impl<'a> SigningInput<'a> {
    /// Short operation name, used in log events.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Payment { .. } => "payment",
            Self::Tokenization { .. } => "tokenization",
            Self::MarketplacePayment { .. } => "marketplace_payment",
            Self::DeliveryConfirmation { .. } => "delivery_confirmation",
            Self::CardDeliveryConfirmation { .. } => "card_delivery_confirmation",
        }
    }

    /// Returns the signed fields in order, excluding the leading terminal id.
    #[must_use]
    pub fn fields(&self) -> Vec<&'a str> {
        match *self {
            Self::Payment {
                order_id,
                amount,
                callback_url,
            }
            | Self::MarketplacePayment {
                order_id,
                amount,
                callback_url,
            } => vec![order_id, amount, callback_url],
            Self::Tokenization { phone, gate } => vec![phone, gate],
            Self::DeliveryConfirmation {
                transaction_id,
                amount,
            } => vec![transaction_id, amount],
            Self::CardDeliveryConfirmation {
                parent_transaction_id,
            } => vec![parent_transaction_id],
        }
    }

    /// Builds the exact string that is signed for `terminal_id`.
    #[must_use]
    pub fn canonical(&self, terminal_id: &str) -> String {
        concat_fields(terminal_id, &self.fields())
    }
}

pub(super) fn concat_fields(terminal_id: &str, fields: &[&str]) -> String {
    let len = terminal_id.len() + fields.iter().map(|f| f.len()).sum::<usize>();
    let mut out = String::with_capacity(len);
    out.push_str(terminal_id);
    for field in fields {
        out.push_str(field);
    }
    out
}
