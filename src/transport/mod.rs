//! Transport layer for talking to the gateway over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The uniform response envelope and its classification ([`ResponseEnvelope`], [`classify`])
//! - JSON request sending ([`Transport`])

mod client;
mod envelope;
mod error;
mod http;
mod sender;

#[cfg(test)]
mod envelope_tests;
#[cfg(test)]
pub(crate) mod mock;

pub use client::ReqwestClient;
pub use envelope::{ResponseEnvelope, SUCCESS_CODE, classify};
pub use error::{ApiError, GatewayError, HttpError, RejectionKind};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use sender::Transport;
