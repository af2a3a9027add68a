//! Errors produced while resolving and dispatching prompt commands.

use crate::command::ExitCode;

/// Everything that can go wrong between reading a line and finishing its action.
///
/// Fatal variants end the whole session; the rest only abort the command
/// being handled and the loop goes back to waiting for input.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Somehow command_resolution is unset.")]
    RegistryUnset,

    #[error("Command [{command}] Missing Required Keys: [{}]", .missing.join(", "))]
    MalformedDescriptor {
        command: String,
        missing: Vec<&'static str>,
    },

    #[error("Command [{command}] has an unsupported kind")]
    UnsupportedKind { command: String },

    #[error("Command [{command}] failed: {reason}")]
    ActionFailed { command: String, reason: String },

    #[error("Command [{command}] panicked in its worker: {message}")]
    ActionPanicked { command: String, message: String },

    #[error("interrupted")]
    Interrupted,

    #[error("I/O error: {0}")]
    Io(String),
}

impl DispatchError {
    /// Whether this error terminates the session instead of a single command.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DispatchError::RegistryUnset | DispatchError::Interrupted | DispatchError::Io(_)
        )
    }

    /// Process exit status to use when this error ends the session.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DispatchError::Interrupted => 130,
            _ => 1,
        }
    }
}

/// Errors produced while loading a [`SessionConfig`](crate::config::SessionConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("can't read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
