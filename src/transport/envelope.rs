//! The uniform response envelope and response classification.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use super::{ApiError, GatewayError, HttpResponse, RejectionKind};

/// Business code the gateway uses for an accepted request.
pub const SUCCESS_CODE: i64 = 200;

/// Body of every gateway response: `{"code": int, "message": string, "url": string}`.
///
/// Missing fields decode to their defaults (`0` and empty strings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    /// Business result code; `200` means accepted
    pub code: i64,
    /// Human-readable result or error description
    pub message: String,
    /// Redirect URL for the payer (payment page, 3-D Secure, etc.)
    pub url: String,
}

impl ResponseEnvelope {
    /// Returns true if the business code signals acceptance.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Classifies a gateway response.
///
/// The body is decoded even for non-200 statuses because the gateway puts
/// error details there. Success requires both HTTP 200 and envelope code 200.
///
/// # Errors
///
/// Checked in order:
/// - [`GatewayError::Decode`] if the body is not an envelope (raw body included)
/// - [`GatewayError::Api`] with [`RejectionKind::HttpStatus`] if the status is not 200
/// - [`GatewayError::Api`] with [`RejectionKind::BusinessCode`] if the code is not 200
pub fn classify(response: HttpResponse) -> Result<ResponseEnvelope, GatewayError> {
    let status = response.status;

    let envelope: ResponseEnvelope =
        serde_json::from_slice(&response.body).map_err(|source| GatewayError::Decode {
            status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
            source,
        })?;

    if status != StatusCode::OK {
        return Err(ApiError {
            status,
            kind: RejectionKind::HttpStatus,
            envelope,
        }
        .into());
    }

    if !envelope.is_accepted() {
        return Err(ApiError {
            status,
            kind: RejectionKind::BusinessCode,
            envelope,
        }
        .into());
    }

    Ok(envelope)
}
