//! Startup configuration for a prompt session, loaded from TOML.

use crate::error::ConfigError;
use crate::registry::Registry;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Environment variable naming an optional configuration file.
pub const CONFIG_ENV: &str = "COMMAND_PROMPT_CONFIG";

/// Typed session configuration.
///
/// Keys this crate doesn't know about land in [`SessionConfig::extra`]
/// so actions can read deployment-specific data without the session
/// having to grow a field for each one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// Text shown before every input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Printed once when the loop starts.
    #[serde(default = "default_welcome_msg")]
    pub welcome_msg: String,
    /// Display name used by the greeting actions.
    #[serde(default = "default_name")]
    pub name: String,
    /// Print a notice for commands missing from a non-empty registry instead of
    /// ignoring them silently.
    #[serde(default)]
    pub report_unknown: bool,
    /// Replaces the built-in commands when present.
    #[serde(default)]
    pub command_resolution: Option<Registry>,
    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

fn default_prompt() -> String {
    ">>> ".to_string()
}
fn default_welcome_msg() -> String {
    "Welcome to the command prompt!".to_string()
}
fn default_name() -> String {
    "User".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            welcome_msg: default_welcome_msg(),
            name: default_name(),
            report_unknown: false,
            command_resolution: None,
            extra: HashMap::new(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Take the configured registry, falling back to [`Registry::builtin`].
    pub fn take_registry(&mut self) -> Registry {
        self.command_resolution
            .take()
            .unwrap_or_else(Registry::builtin)
    }
}
