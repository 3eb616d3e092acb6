//! Request signing for the gateway.
//!
//! This module provides:
//! - Terminal identity ([`Credentials`])
//! - Token derivation ([`Signer`], [`sign`], [`Token`])
//! - The fixed per-operation field order that is signed ([`SigningInput`])
//!
//! # Algorithm
//!
//! ```text
//! hashed = HMAC-SHA256(key = terminal_id, message = secret)      // raw bytes
//! token  = hex(HMAC-SHA256(key = hashed, message = signing_input))
//! ```

mod credentials;
mod input;
mod signer;

#[cfg(test)]
mod signer_tests;

pub use credentials::Credentials;
pub use input::SigningInput;
pub use signer::{Signer, Token, sign};
