use crate::command::ActionId;
use crate::session::Session;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};

/// Actions a session can run, each with its own argument bundle.
///
/// Arguments are parsed using the [`argh`] crate (`FromArgs`) from the
/// optional `args` list of the command's descriptor.
pub(crate) trait SessionAction: Sized + FromArgs {
    /// Identifier registries use to point at this action.
    fn id() -> ActionId;

    /// Runs the action against the session.
    fn execute(self, session: &mut Session) -> Result<()>;
}

impl ActionId {
    /// Parse `args` for this action and run it.
    ///
    /// `--help` prints the action's usage and succeeds; any other argument
    /// error is returned as a failure.
    pub fn run(self, session: &mut Session, args: Option<&[String]>) -> Result<()> {
        let args: Vec<&str> = args
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();
        match self {
            ActionId::SayHello => run_parsed::<SayHello>(session, &args),
            ActionId::SetNickname => run_parsed::<SetNickname>(session, &args),
            ActionId::GoodBye => run_parsed::<GoodBye>(session, &args),
        }
    }
}

fn run_parsed<T: SessionAction>(session: &mut Session, args: &[&str]) -> Result<()> {
    let name = T::id().as_str();
    match T::from_args(&[name], args) {
        Ok(action) => action.execute(session),
        Err(EarlyExit { output, status }) => match status {
            Ok(()) => {
                writeln!(session.output(), "{}", output.trim_end())?;
                Ok(())
            }
            Err(()) => Err(anyhow::anyhow!("{}: {}", name, output.trim_end())),
        },
    }
}

#[derive(FromArgs)]
/// Greet the user by name.
pub struct SayHello {
    #[argh(option, default = "String::from(\"Hello\")")]
    /// word to greet with. Defaults to "Hello".
    pub greeting: String,
}

impl SessionAction for SayHello {
    fn id() -> ActionId {
        ActionId::SayHello
    }

    fn execute(self, session: &mut Session) -> Result<()> {
        let name = session.config.name.clone();
        writeln!(session.output(), "{}, {}!", self.greeting, name)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the nickname stored in the session.
pub struct SetNickname {
    #[argh(positional)]
    /// new nickname; asked for on the session input when omitted.
    pub nickname: Option<String>,
}

impl SessionAction for SetNickname {
    fn id() -> ActionId {
        ActionId::SetNickname
    }

    fn execute(self, session: &mut Session) -> Result<()> {
        let nickname = match self.nickname {
            Some(nickname) => nickname,
            None => session
                .ask("Please enter new nickname: ")
                .context("set_nickname: can't read nickname")?
                .ok_or_else(|| anyhow::anyhow!("set_nickname: input closed"))?,
        };
        writeln!(session.output(), "Nickname changed to: {}", nickname)?;
        session.nickname = Some(nickname);
        Ok(())
    }
}

#[derive(FromArgs)]
/// Say goodbye without leaving the prompt.
pub struct GoodBye {}

impl SessionAction for GoodBye {
    fn id() -> ActionId {
        ActionId::GoodBye
    }

    fn execute(self, session: &mut Session) -> Result<()> {
        let name = session.display_name().to_string();
        writeln!(session.output(), "See you later, {}!", name)?;
        Ok(())
    }
}
