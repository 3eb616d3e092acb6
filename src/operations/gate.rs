//! Gate names accepted by the gateway.
//!
//! Sent in the `gate` header (and, for tokenization, in the body). The
//! gateway may add gates at any time, so operations take plain strings.

/// Korti Milli national card.
pub const KORTI_MILLI: &str = "korti_milli";
/// Alif wallet.
pub const WALLET: &str = "wallet";
/// Salom installment card.
pub const SALOM: &str = "salom";
/// Cash payment by invoice; use with [`PaymentRequest::deadline`](super::PaymentRequest::deadline).
pub const INVOICE: &str = "invoice";
/// Visa.
pub const VSA: &str = "vsa";
/// Mastercard.
pub const MCR: &str = "mcr";
/// Cybersource hosted checkout.
pub const CYBERSOURCE_CHECKOUT: &str = "cybersource_checkout";

/// Tokenization gates.
pub mod tokenization {
    pub const KORTI_MILLI: &str = "tokenization_korti_milli";
    pub const WALLET: &str = "tokenization_wallet";
    pub const SALOM: &str = "tokenization_salom";
    pub const TCELL: &str = "tokenization_tcell";
    pub const MEGAFON: &str = "tokenization_megafon";
    pub const BABILON: &str = "tokenization_babilon";
    pub const ZETMOBILE: &str = "tokenization_zetmobile";
    /// Visa/Mastercard.
    pub const PROCARD: &str = "tokenization_procard";
}
