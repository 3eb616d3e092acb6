//! Interpretation of gateway callbacks.
//!
//! The gateway reports outcomes asynchronously by POSTing a notification to
//! the merchant's callback URL. This module provides:
//! - Status vocabularies with forward-compatible fallbacks ([`PaymentStatus`], [`TokenizationCode`])
//! - The three notification shapes ([`PaymentNotification`], [`TokenizationNotification`],
//!   [`MarketplaceNotification`])
//! - Pure classification into outcome categories ([`PaymentOutcome`], [`TokenizationOutcome`])
//! - A framework-agnostic acknowledgment routine for the receiving server ([`acknowledge`])
//!
//! Classification is a pure function of the payload: the gateway may
//! deliver the same notification more than once and it will classify the
//! same way every time.
//!
//! Notifications are not authenticated. Anyone who can reach the callback
//! URL can post one, so treat an outcome as a hint to re-check the
//! transaction rather than as proof of payment.

mod handler;
mod notification;
mod status;


pub use handler::{CallbackHandler, CallbackReply, LoggingHandler, acknowledge};
pub use notification::{
    Callback, CallbackError, CallbackKind, MarketplaceNotification, PaymentNotification,
    SubTransaction, TokenizationNotification, TokenizationPayload,
};
pub use status::{PaymentOutcome, PaymentStatus, TokenizationCode, TokenizationOutcome};
