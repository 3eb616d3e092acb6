//! Default values for configuration options.

/// Default gateway base URL.
pub const BASE_URL: &str = "https://web.alif.tj";

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;
