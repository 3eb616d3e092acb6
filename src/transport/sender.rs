//! JSON request sending over an [`HttpClient`].

use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;

use super::{GatewayError, HttpClient, HttpRequest, ResponseEnvelope, classify};

/// Sends JSON payloads and classifies the gateway's envelope response.
///
/// Holds no per-call state. One `Transport` can serve any number of
/// concurrent calls; each `send` is an independent round trip.
///
/// # Example
///
/// ```
/// use alif_pay::transport::{ReqwestClient, Transport};
/// use std::time::Duration;
///
/// let transport = Transport::new(ReqwestClient::new())
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(transport.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct Transport<H> {
    client: H,
    timeout: Duration,
}

impl<H> Transport<H> {
    /// Default round-trip timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a transport with the default timeout.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the round-trip timeout applied to every call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient> Transport<H> {
    /// Serializes `payload` as JSON, sends it, and classifies the response.
    ///
    /// `Content-Type: application/json` is always set; `headers` may add
    /// operation-specific ones.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Serialize`] if the payload cannot be encoded (nothing is sent)
    /// - [`GatewayError::Transport`] on network or body-read failure
    /// - [`GatewayError::Decode`] / [`GatewayError::Api`] as described in [`classify`]
    pub async fn send<T>(
        &self,
        method: Method,
        url: url::Url,
        headers: HeaderMap,
        payload: &T,
    ) -> Result<ResponseEnvelope, GatewayError>
    where
        T: Serialize + Sync + ?Sized,
    {
        self.send_with_timeout(method, url, headers, payload, self.timeout)
            .await
    }

    /// Like [`send`](Self::send) but with a deadline for this call only.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_with_timeout<T>(
        &self,
        method: Method,
        url: url::Url,
        headers: HeaderMap,
        payload: &T,
        timeout: Duration,
    ) -> Result<ResponseEnvelope, GatewayError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(GatewayError::Serialize)?;

        let mut request = HttpRequest::new(method, url)
            .with_body(body)
            .with_timeout(timeout)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &headers {
            request.headers.append(name, value.clone());
        }

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            timeout_secs = timeout.as_secs(),
            "Sending gateway request"
        );

        let response = self.client.request(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Gateway request failed");
            GatewayError::from(e)
        })?;

        let status = response.status;
        let result = classify(response);
        match &result {
            Ok(envelope) => tracing::debug!(
                status = status.as_u16(),
                code = envelope.code,
                "Gateway accepted request"
            ),
            Err(e) => tracing::warn!(status = status.as_u16(), error = %e, "Gateway rejected request"),
        }
        result
    }
}
