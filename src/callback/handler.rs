//! Acknowledging callbacks for the receiving HTTP server.

use http::{Method, StatusCode};

use super::{
    Callback, CallbackKind, MarketplaceNotification, PaymentNotification, PaymentOutcome,
    TokenizationNotification, TokenizationOutcome,
};

/// Caller-supplied side effects for classified notifications.
///
/// All methods default to doing nothing. Unrecognized statuses and codes go
/// to [`on_unrecognized`](Self::on_unrecognized) instead of the per-kind
/// method, so a new gateway status is never mistaken for a known one.
pub trait CallbackHandler: Send + Sync {
    /// A payment notification with a known status.
    fn on_payment(&self, _notification: &PaymentNotification, _outcome: PaymentOutcome) {}

    /// A tokenization notification with a known code.
    fn on_tokenization(
        &self,
        _notification: &TokenizationNotification,
        _outcome: &TokenizationOutcome,
    ) {
    }

    /// A marketplace notification with a known parent status.
    fn on_marketplace(&self, _notification: &MarketplaceNotification, _outcome: PaymentOutcome) {}

    /// A notification whose status or code is outside the known vocabulary.
    fn on_unrecognized(&self, _callback: &Callback) {}
}

/// Handler that only logs each notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl CallbackHandler for LoggingHandler {
    fn on_payment(&self, n: &PaymentNotification, outcome: PaymentOutcome) {
        tracing::info!(
            order_id = %n.order_id,
            transaction_id = %n.transaction_id,
            status = %n.status,
            amount = n.amount,
            "Payment {outcome}"
        );
    }

    fn on_tokenization(&self, n: &TokenizationNotification, outcome: &TokenizationOutcome) {
        tracing::info!(
            order_id = %n.payload.order_id,
            code = n.code.as_i64(),
            "Tokenization {outcome}"
        );
    }

    fn on_marketplace(&self, n: &MarketplaceNotification, outcome: PaymentOutcome) {
        tracing::info!(
            order_id = %n.order_id,
            status = %n.status,
            amount = n.amount,
            sub_transactions = n.sub_transactions.len(),
            "Marketplace payment {outcome}"
        );
        for (sub, sub_outcome) in n.sub_outcomes() {
            tracing::info!(
                terminal_id = %sub.terminal_id,
                transaction_id = %sub.transaction_id,
                status = %sub.status,
                "Sub-transaction {sub_outcome}"
            );
        }
    }

    fn on_unrecognized(&self, callback: &Callback) {
        tracing::warn!(
            kind = %callback.kind(),
            order_id = %callback.order_id(),
            "Not acting on unrecognized notification"
        );
    }
}

/// HTTP reply to send back to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackReply {
    /// Status code
    pub status: StatusCode,
    /// Plain-text body
    pub body: &'static str,
}

impl CallbackReply {
    const fn new(status: StatusCode, body: &'static str) -> Self {
        Self { status, body }
    }

    /// Returns true if the gateway should consider the notification delivered.
    #[must_use]
    pub fn is_acknowledged(&self) -> bool {
        self.status == StatusCode::OK
    }
}

impl From<CallbackReply> for http::Response<String> {
    fn from(reply: CallbackReply) -> Self {
        let mut response = Self::new(reply.body.to_string());
        *response.status_mut() = reply.status;
        response
    }
}

/// Handles one inbound callback request.
///
/// - Non-POST methods get `405 Method not allowed`.
/// - Bodies that do not decode as `kind` get `400 Bad request`.
/// - Everything else is classified, passed to `handler`, and answered with
///   `200 OK`, whatever the business outcome.
pub fn acknowledge<H>(kind: CallbackKind, method: &Method, body: &[u8], handler: &H) -> CallbackReply
where
    H: CallbackHandler + ?Sized,
{
    if *method != Method::POST {
        tracing::debug!(%kind, %method, "Rejecting callback with unsupported method");
        return CallbackReply::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let callback = match Callback::decode(kind, body) {
        Ok(callback) => callback,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting undecodable callback");
            return CallbackReply::new(StatusCode::BAD_REQUEST, "Bad request");
        }
    };

    dispatch(&callback, handler);
    CallbackReply::new(StatusCode::OK, "OK")
}

fn dispatch<H>(callback: &Callback, handler: &H)
where
    H: CallbackHandler + ?Sized,
{
    if callback.is_unrecognized() {
        tracing::warn!(
            kind = %callback.kind(),
            order_id = %callback.order_id(),
            "Unrecognized callback status"
        );
        handler.on_unrecognized(callback);
        return;
    }

    match callback {
        Callback::Payment(n) => {
            let outcome = n.outcome();
            tracing::debug!(order_id = %n.order_id, %outcome, "Classified payment callback");
            handler.on_payment(n, outcome);
        }
        Callback::Tokenization(n) => {
            let outcome = n.outcome();
            tracing::debug!(order_id = %n.payload.order_id, %outcome, "Classified tokenization callback");
            handler.on_tokenization(n, &outcome);
        }
        Callback::Marketplace(n) => {
            let outcome = n.outcome();
            tracing::debug!(order_id = %n.order_id, %outcome, "Classified marketplace callback");
            handler.on_marketplace(n, outcome);
        }
    }
}
