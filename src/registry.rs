use crate::command::{ActionId, CommandDescriptor, CommandEntry, CommandKind, DescriptorRecord};
use crate::error::DispatchError;
use serde::Deserialize;
use std::collections::HashMap;

/// Mapping from command name to the entry describing how to run it.
///
/// Names are case-sensitive. A registry is built once per session and only
/// read afterwards; there is no way to register commands mid-session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: HashMap<String, CommandEntry>,
}

impl Registry {
    /// Create a registry from caller-supplied entries.
    ///
    /// The built-in commands are not merged in: a supplied registry replaces
    /// them entirely, even when it is empty.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CommandEntry>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The default command set:
    /// - `hello`: greet the user, isolated worker
    /// - `nickname`: change the stored nickname, inline
    /// - `goodbye`: say goodbye without leaving, isolated worker
    pub fn builtin() -> Self {
        let record = |action, thread_safe| DescriptorRecord {
            target_action: Some(action),
            kind: Some(CommandKind::SelfMethod),
            thread_safe: Some(thread_safe),
            args: None,
        };
        Self::new([
            ("hello", record(ActionId::SayHello, true)),
            ("nickname", record(ActionId::SetNickname, false)),
            ("goodbye", record(ActionId::GoodBye, true)),
        ])
    }

    /// Find the entry registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.get(name)
    }

    /// Find and validate the entry registered under `name`.
    ///
    /// Returns `None` when no such command exists.
    pub fn resolve(&self, name: &str) -> Option<Result<CommandDescriptor, DispatchError>> {
        self.lookup(name).map(|entry| entry.validate(name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// List all registered command names (sorted).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}
