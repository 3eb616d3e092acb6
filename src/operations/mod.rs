//! Gateway operations.
//!
//! One method per business action on [`GatewayClient`]. Each builds its
//! payload, signs the operation's fixed field order, and sends it through
//! the [`Transport`](crate::transport::Transport).

mod client;
mod endpoint;
pub mod gate;
mod models;


pub use client::GatewayClient;
pub use endpoint::Endpoint;
pub use models::{
    CardDeliveryConfirmationRequest, DeliveryConfirmationRequest, DeliveryTransaction, Invoice,
    Invoices, MarketplaceInvoice, MarketplacePaymentRequest, MpTerminalInfo, PaymentRequest,
    TokenizationRequest,
};
