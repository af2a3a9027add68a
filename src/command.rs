use crate::error::DispatchError;
use serde::Deserialize;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Stable identifier of an action the session knows how to run.
///
/// Every target a descriptor can point at is listed here ahead of time, so a
/// registry can never name something that isn't compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    #[serde(alias = "sayHello")]
    SayHello,
    #[serde(alias = "setNickname")]
    SetNickname,
    #[serde(alias = "goodBye")]
    GoodBye,
}

impl ActionId {
    /// Identifier as written in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::SayHello => "say_hello",
            ActionId::SetNickname => "set_nickname",
            ActionId::GoodBye => "good_bye",
        }
    }
}

/// How a command's target is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// The target is an action owned by the [`Session`](crate::Session).
    #[serde(alias = "SelfMethod")]
    SelfMethod,
    /// Any kind this version doesn't know how to run. Dispatch rejects it.
    #[serde(other)]
    Unsupported,
}

/// Descriptor as it appears in a registry, before validation.
///
/// Required fields are optional here because configuration is allowed to be
/// incomplete; [`DescriptorRecord::validate`] reports what is missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DescriptorRecord {
    #[serde(rename = "targetAction", alias = "function")]
    pub target_action: Option<ActionId>,
    #[serde(alias = "type")]
    pub kind: Option<CommandKind>,
    #[serde(rename = "threadSafe", alias = "threadsafe")]
    pub thread_safe: Option<bool>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

/// Required keys, sorted so error messages are deterministic.
pub const REQUIRED_FIELDS: [&str; 3] = ["kind", "targetAction", "threadSafe"];

impl DescriptorRecord {
    /// Check that every required field is present and build the executable descriptor.
    ///
    /// On failure the error lists exactly the missing field names, in
    /// [`REQUIRED_FIELDS`] order.
    pub fn validate(&self, name: &str) -> Result<CommandDescriptor, DispatchError> {
        match (self.kind, self.target_action, self.thread_safe) {
            (Some(kind), Some(target_action), Some(thread_safe)) => Ok(CommandDescriptor {
                name: name.to_string(),
                target_action,
                kind,
                thread_safe,
                args: self.args.clone(),
            }),
            (kind, target_action, thread_safe) => {
                let present = [kind.is_some(), target_action.is_some(), thread_safe.is_some()];
                let missing = REQUIRED_FIELDS
                    .iter()
                    .zip(present)
                    .filter(|(_, present)| !present)
                    .map(|(field, _)| *field)
                    .collect();
                Err(DispatchError::MalformedDescriptor {
                    command: name.to_string(),
                    missing,
                })
            }
        }
    }
}

/// A registry value: either a full record or the shortcut form.
///
/// The shortcut is a bare action identifier, e.g. `bye = "good_bye"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CommandEntry {
    Shortcut(ActionId),
    Record(DescriptorRecord),
}

impl CommandEntry {
    /// Resolve this entry into something dispatch can execute.
    ///
    /// The shortcut form flattens to a synchronous, argument-less
    /// [`CommandKind::SelfMethod`] call.
    pub fn validate(&self, name: &str) -> Result<CommandDescriptor, DispatchError> {
        match self {
            CommandEntry::Shortcut(action) => Ok(CommandDescriptor {
                name: name.to_string(),
                target_action: *action,
                kind: CommandKind::SelfMethod,
                thread_safe: false,
                args: None,
            }),
            CommandEntry::Record(record) => record.validate(name),
        }
    }
}

impl From<ActionId> for CommandEntry {
    fn from(action: ActionId) -> Self {
        CommandEntry::Shortcut(action)
    }
}

impl From<DescriptorRecord> for CommandEntry {
    fn from(record: DescriptorRecord) -> Self {
        CommandEntry::Record(record)
    }
}

/// A validated descriptor, ready to be invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    pub name: String,
    pub target_action: ActionId,
    pub kind: CommandKind,
    /// Run on an isolated worker that is joined before the next prompt.
    pub thread_safe: bool,
    pub args: Option<Vec<String>>,
}
