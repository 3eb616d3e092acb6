//! Gateway endpoint paths.

use url::Url;

use crate::transport::GatewayError;

/// A gateway endpoint, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Payments, tokenization and marketplace payments.
    Payments,
    /// Delivery confirmation for held payments.
    ConfirmDelivery,
    /// Delivery confirmation for Visa/Mastercard marketplace payments.
    ConfirmCardDelivery,
}

impl Endpoint {
    /// Path appended to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Payments => "/v2/",
            Self::ConfirmDelivery => "/confirm-delivery",
            Self::ConfirmCardDelivery => "/confirm-vsa-and-mcr-delivery",
        }
    }

    /// Joins this endpoint onto `base`.
    ///
    /// A trailing slash on `base` is dropped first, so both
    /// `https://host` and `https://host/` yield `https://host/v2/`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidEndpoint`] if the joined string is not a URL.
    pub fn url(self, base: &Url) -> Result<Url, GatewayError> {
        let joined = format!("{}{}", base.as_str().trim_end_matches('/'), self.path());
        Url::parse(&joined).map_err(|source| GatewayError::InvalidEndpoint {
            url: joined,
            source,
        })
    }
}
