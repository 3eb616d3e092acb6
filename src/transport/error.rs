//! Error types for gateway calls.

use http::StatusCode;
use thiserror::Error;

use super::ResponseEnvelope;

/// Error type for HTTP operations.
///
/// Describes what went wrong on the wire. No envelope is ever available
/// when one of these occurs.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response arrived but its body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Which check rejected a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// HTTP status was not 200 (checked first).
    HttpStatus,
    /// HTTP status was 200 but the envelope code was not 200.
    BusinessCode,
}

/// A response the gateway answered but did not accept.
///
/// Carries the full decoded envelope so callers can still read the
/// server-sent `message` and `url`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error (HTTP {}, code {}): {}", .status.as_u16(), .envelope.code, .envelope.message)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: StatusCode,
    /// Which check failed
    pub kind: RejectionKind,
    /// The decoded response body
    pub envelope: ResponseEnvelope,
}

impl ApiError {
    /// Business code from the envelope.
    #[must_use]
    pub const fn code(&self) -> i64 {
        self.envelope.code
    }

    /// Message from the envelope.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.envelope.message
    }
}

/// Error type for a complete gateway call.
///
/// Variants are ordered the way a call can fail: local preparation first,
/// then the network, then decoding, then the gateway's verdict.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request payload could not be serialized. Nothing was sent.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A header value is not valid HTTP header text. Nothing was sent.
    #[error("Invalid value for header '{name}': {value:?}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Offending value
        value: String,
    },

    /// The endpoint URL could not be built from the base URL.
    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        /// The URL that failed to parse
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// Network or body-read failure.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The response body is not a valid envelope.
    #[error("Failed to decode response (HTTP {}): {source} (body: {body})", .status.as_u16())]
    Decode {
        /// HTTP status of the response
        status: StatusCode,
        /// Raw body, lossily decoded as UTF-8
        body: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The gateway rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl GatewayError {
    /// Returns the partially parsed envelope, if the gateway sent one.
    #[must_use]
    pub const fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Api(e) => Some(&e.envelope),
            _ => None,
        }
    }

    /// Returns true if the request never left the process.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Serialize(_) | Self::InvalidHeader { .. } | Self::InvalidEndpoint { .. }
        )
    }
}
