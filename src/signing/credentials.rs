//! Terminal identity issued by the gateway.

use std::fmt;
use std::sync::Arc;

/// Terminal identifier and secret.
///
/// Immutable once constructed. Cloning is cheap (the strings are shared),
/// so one set of credentials can back any number of clients and tasks.
///
/// The secret is never transmitted; only tokens derived from it are.
/// The `Debug` implementation redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    terminal_id: Arc<str>,
    secret: Arc<str>,
}

impl Credentials {
    /// Creates credentials from a terminal id and its secret.
    #[must_use]
    pub fn new(terminal_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            terminal_id: Arc::from(terminal_id.into()),
            secret: Arc::from(secret.into()),
        }
    }

    /// Returns the terminal id (sent as `key` on every request).
    #[must_use]
    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("terminal_id", &self.terminal_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
