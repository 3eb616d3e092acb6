//! alif-pay: Alif payment gateway client
//!
//! A library for initiating payments, tokenizations and marketplace
//! payments against the Alif gateway, confirming deliveries, and
//! interpreting the callback notifications the gateway posts back.
//!
//! - [`signing`]: the HMAC-SHA256 request token
//! - [`transport`]: the JSON-over-HTTPS envelope and its classification
//! - [`operations`]: the signed gateway operations
//! - [`callback`]: notification decoding and acknowledgement
//! - [`config`]: CLI and TOML configuration for the `alif-pay` binary

pub mod callback;
pub mod config;
pub mod operations;
pub mod signing;
pub mod transport;
