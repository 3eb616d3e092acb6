//! HMAC-SHA256 token derivation.

use std::fmt;

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use super::input::concat_fields;
use super::{Credentials, SigningInput};

type HmacSha256 = Hmac<Sha256>;

/// A per-request authentication token: 64 lower-case hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Returns the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the hex string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derives a token from a terminal secret, terminal id and signing input.
///
/// The secret is first HMAC'd with the terminal id as key; the raw digest
/// then keys a second HMAC over `input`. Pure and deterministic. An empty
/// `input` is accepted and yields a valid (if meaningless) token.
///
/// # Example
///
/// ```
/// use alif_pay::signing::sign;
///
/// let token = sign("s3cr3t", "T1", "T1ORDER123100.00https://cb");
/// assert_eq!(token.as_str().len(), 64);
/// ```
#[must_use]
pub fn sign(secret: &str, terminal_id: &str, input: &str) -> Token {
    let hashed = hashed_secret(secret, terminal_id);
    token_from_hashed(&hashed, input)
}

fn hashed_secret(secret: &str, terminal_id: &str) -> [u8; 32] {
    let mut mac = new_mac(terminal_id.as_bytes());
    mac.update(secret.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

fn token_from_hashed(hashed: &[u8], input: &str) -> Token {
    let mut mac = new_mac(hashed);
    mac.update(input.as_bytes());
    Token(hex::encode(mac.finalize().into_bytes()))
}

fn new_mac(key: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length")
}

/// Signs requests for one terminal.
///
/// The intermediate hashed secret is derived once at construction; every
/// [`sign`](Self::sign) call after that is a single HMAC over the input.
/// `Signer` holds no mutable state and is safe to share across tasks.
#[derive(Clone)]
pub struct Signer {
    credentials: Credentials,
    hashed_secret: [u8; 32],
}

impl Signer {
    /// Creates a signer for the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        let hashed_secret = hashed_secret(credentials.secret(), credentials.terminal_id());
        Self {
            credentials,
            hashed_secret,
        }
    }

    /// Returns the terminal id requests are signed for.
    #[must_use]
    pub fn terminal_id(&self) -> &str {
        self.credentials.terminal_id()
    }

    /// Computes the token for an operation's signing input.
    #[must_use]
    pub fn sign(&self, input: &SigningInput<'_>) -> Token {
        token_from_hashed(&self.hashed_secret, &input.canonical(self.terminal_id()))
    }

    /// Computes the token for arbitrary fields, prefixed with the terminal id.
    ///
    /// Intended for diagnostics; operations use [`sign`](Self::sign).
    #[must_use]
    pub fn sign_fields(&self, fields: &[&str]) -> Token {
        token_from_hashed(
            &self.hashed_secret,
            &concat_fields(self.terminal_id(), fields),
        )
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
