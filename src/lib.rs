//! A small interactive command prompt driven by a declarative command registry.
//!
//! Each line typed at the prompt is looked up in a [`Registry`] that maps
//! command names to descriptors. A descriptor names a typed action, says how
//! to run it and may carry an argument bundle. Thread-safe commands run on an
//! isolated worker that is joined before the next line is read; the rest run
//! inline. Typing `quit` ends the session.
//!
//! The main entry point is [`Prompt`]. The public modules [`command`],
//! [`registry`] and [`config`] expose the descriptor types, the registry and
//! the TOML configuration a session is started from.

mod actions;
pub mod command;
pub mod config;
pub mod error;
mod io_adapters;
mod prompt;
pub mod registry;
mod session;

pub use command::{ActionId, CommandDescriptor, CommandEntry, CommandKind, ExitCode};
pub use config::SessionConfig;
pub use error::{ConfigError, DispatchError};
pub use io_adapters::{
    LineInput, LineReader, ReadLine, ScriptedReader, SharedWriter, StdinLines,
};
pub use prompt::{Execution, FAREWELL, Outcome, Prompt, QUIT, run_isolated};
pub use registry::Registry;
pub use session::Session;
