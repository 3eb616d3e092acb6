//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Gateway connection section
    #[serde(default)]
    pub gateway: GatewaySection,

    /// Terminal credentials section
    #[serde(default)]
    pub terminal: TerminalSection,
}

/// Gateway connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    /// Gateway base URL
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Terminal credentials section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminalSection {
    /// Terminal id
    pub id: Option<String>,

    /// Terminal secret
    pub secret: Option<String>,
}

impl std::fmt::Debug for TerminalSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSection")
            .field("id", &self.id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# alif-pay Configuration File

[gateway]
# Gateway base URL (default: https://web.alif.tj)
# base_url = "https://web.alif.tj"

# Request timeout in seconds (default: 30)
# timeout = 30

[terminal]
# Terminal id issued by the gateway (required)
# id = "your-terminal-id"

# Terminal secret (required)
# Prefer the ALIF_TERMINAL_SECRET environment variable over storing it here
# secret = "your-terminal-secret"
"#
    .to_string()
}
