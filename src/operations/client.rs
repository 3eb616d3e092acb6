//! The gateway client.

use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;
use url::Url;

use crate::signing::{Credentials, Signer, SigningInput};
use crate::transport::{GatewayError, HttpClient, ReqwestClient, ResponseEnvelope, Transport};

use super::Endpoint;
use super::models::{
    CardDeliveryConfirmationRequest, DeliveryConfirmationRequest, MarketplacePaymentRequest,
    PaymentRequest, Signed, TokenizationBody, TokenizationRequest,
};

const GATE_HEADER: HeaderName = HeaderName::from_static("gate");
// Header names are case-insensitive; `http` stores them lower-cased.
const MARKETPLACE_HEADER: HeaderName = HeaderName::from_static("ismarketplace");

/// Client for the payment gateway.
///
/// Holds the terminal's [`Signer`] and a [`Transport`]. Both are immutable
/// after construction, so a single client can be shared (e.g. behind an
/// `Arc`) and called concurrently. Every call signs and sends a fresh
/// request; nothing is cached between calls and nothing is retried.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use alif_pay::operations::{GatewayClient, PaymentRequest, gate};
/// use alif_pay::signing::Credentials;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GatewayClient::new(
///     Url::parse("https://web.alif.tj")?,
///     Credentials::new("terminal-id", "terminal-secret"),
/// );
///
/// let request = PaymentRequest::new("ORDER-1", "10.00", "https://shop.tj/cb", "https://shop.tj")
///     .with_gate(gate::KORTI_MILLI);
/// let envelope = client.initiate_payment(&request).await?;
/// println!("Redirect payer to {}", envelope.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClient<H = ReqwestClient> {
    transport: Transport<H>,
    signer: Signer,
    base_url: Url,
}

impl GatewayClient<ReqwestClient> {
    /// Creates a client using [`ReqwestClient`] and the default timeout.
    #[must_use]
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self::with_http_client(ReqwestClient::new(), base_url, credentials)
    }
}

impl<H> GatewayClient<H> {
    /// Creates a client over a custom HTTP client.
    #[must_use]
    pub fn with_http_client(client: H, base_url: Url, credentials: Credentials) -> Self {
        Self {
            transport: Transport::new(client),
            signer: Signer::new(credentials),
            base_url,
        }
    }

    /// Sets the round-trip timeout for every call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }

    /// Returns the signer used for every request.
    #[must_use]
    pub const fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Transport<H> {
        &self.transport
    }
}

impl<H: HttpClient> GatewayClient<H> {
    /// Initiates a payment through a standard or external gate.
    ///
    /// Signs terminal id, order id, amount and callback URL. The `gate`
    /// header carries the request's gate (empty when unset).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request cannot be built or sent, or
    /// if the gateway does not accept it.
    pub async fn initiate_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let input = SigningInput::Payment {
            order_id: &request.order_id,
            amount: &request.amount,
            callback_url: &request.callback_url,
        };
        let gate = request.gate.as_deref().unwrap_or("");
        let mut headers = HeaderMap::new();
        headers.insert(GATE_HEADER, gate_value(gate)?);

        tracing::info!(order_id = %request.order_id, gate, "Initiating payment");
        self.send_signed(Endpoint::Payments, &input, headers, request)
            .await
    }

    /// Initiates tokenization of a card or wallet.
    ///
    /// Signs terminal id, phone and gate. The body is nested under `data`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request cannot be built or sent, or
    /// if the gateway does not accept it.
    pub async fn initiate_tokenization(
        &self,
        request: &TokenizationRequest,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let input = SigningInput::Tokenization {
            phone: &request.phone,
            gate: &request.gate,
        };
        let mut headers = HeaderMap::new();
        headers.insert(GATE_HEADER, gate_value(&request.gate)?);

        let token = self.signer.sign(&input);
        let body = TokenizationBody {
            data: Signed {
                key: self.signer.terminal_id(),
                token: &token,
                request,
            },
        };

        tracing::info!(
            order_id = %request.order_id,
            gate = %request.gate,
            "Initiating tokenization"
        );
        self.send(Endpoint::Payments, headers, &body).await
    }

    /// Initiates a payment split across partner terminals.
    ///
    /// Signed like a payment; sent with the `gate` header and
    /// `isMarketPlace: true`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request cannot be built or sent, or
    /// if the gateway does not accept it.
    pub async fn initiate_marketplace_payment(
        &self,
        request: &MarketplacePaymentRequest,
        gate: &str,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let input = SigningInput::MarketplacePayment {
            order_id: &request.order_id,
            amount: &request.amount,
            callback_url: &request.callback_url,
        };
        let mut headers = HeaderMap::new();
        headers.insert(GATE_HEADER, gate_value(gate)?);
        headers.insert(MARKETPLACE_HEADER, HeaderValue::from_static("true"));

        tracing::info!(
            order_id = %request.order_id,
            gate,
            partners = request.mp_terminal_info.len(),
            "Initiating marketplace payment"
        );
        self.send_signed(Endpoint::Payments, &input, headers, request)
            .await
    }

    /// Confirms delivery of a held payment, capturing `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request cannot be built or sent, or
    /// if the gateway does not accept it.
    pub async fn confirm_delivery(
        &self,
        request: &DeliveryConfirmationRequest,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let input = SigningInput::DeliveryConfirmation {
            transaction_id: &request.transaction_id,
            amount: &request.amount,
        };

        tracing::info!(transaction_id = %request.transaction_id, "Confirming delivery");
        self.send_signed(Endpoint::ConfirmDelivery, &input, HeaderMap::new(), request)
            .await
    }

    /// Confirms delivery for a Visa/Mastercard marketplace payment.
    ///
    /// Only the parent transaction id is signed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request cannot be built or sent, or
    /// if the gateway does not accept it.
    pub async fn confirm_card_delivery(
        &self,
        request: &CardDeliveryConfirmationRequest,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let input = SigningInput::CardDeliveryConfirmation {
            parent_transaction_id: &request.parent_transaction_id,
        };

        tracing::info!(
            parent_transaction_id = %request.parent_transaction_id,
            transactions = request.extra.len(),
            "Confirming card delivery"
        );
        self.send_signed(
            Endpoint::ConfirmCardDelivery,
            &input,
            HeaderMap::new(),
            request,
        )
        .await
    }

    /// Signs `input` and sends `request` with `key`/`token` at top level.
    async fn send_signed<T>(
        &self,
        endpoint: Endpoint,
        input: &SigningInput<'_>,
        headers: HeaderMap,
        request: &T,
    ) -> Result<ResponseEnvelope, GatewayError>
    where
        T: Serialize + Sync,
    {
        let token = self.signer.sign(input);
        let body = Signed {
            key: self.signer.terminal_id(),
            token: &token,
            request,
        };
        self.send(endpoint, headers, &body).await
    }

    async fn send<T>(
        &self,
        endpoint: Endpoint,
        headers: HeaderMap,
        body: &T,
    ) -> Result<ResponseEnvelope, GatewayError>
    where
        T: Serialize + Sync,
    {
        let url = endpoint.url(&self.base_url)?;
        self.transport.send(Method::POST, url, headers, body).await
    }
}

fn gate_value(gate: &str) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(gate).map_err(|_| GatewayError::InvalidHeader {
        name: "gate",
        value: gate.to_string(),
    })
}
