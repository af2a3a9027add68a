use crate::command::{CommandDescriptor, CommandKind, ExitCode};
use crate::config::SessionConfig;
use crate::error::DispatchError;
use crate::io_adapters::{LineInput, LineReader, ReadLine};
use crate::registry::Registry;
use crate::session::Session;
use log::{debug, error};
use std::any::Any;
use std::io::Write;
use std::thread;

/// Line that ends the session. Compared exactly, without trimming.
pub const QUIT: &str = "quit";

/// Printed once when the session ends normally.
pub const FAREWELL: &str = "Goodbye!";

/// How a dispatched command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// In the loop's own control flow.
    Inline,
    /// On a dedicated worker that was joined before returning.
    Isolated,
}

/// Result of handling one input line that didn't end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No command of that name; nothing ran.
    Ignored,
    Completed(Execution),
}

/// The interactive prompt: reads lines, resolves them against the registry
/// and runs the matching action.
///
/// Commands run strictly one after another. A thread-safe command is moved
/// to a worker for fault isolation, but the loop waits for it before reading
/// the next line.
///
/// Example
/// ```
/// use command_prompt::{Prompt, ScriptedReader, SessionConfig, SharedWriter};
/// let out = SharedWriter::new();
/// let config = SessionConfig { name: "Ada".into(), ..SessionConfig::default() };
/// let mut prompt = Prompt::with_io(config, Box::new(std::io::empty()), Box::new(out.clone()));
/// let code = prompt.start(&mut ScriptedReader::new(["hello", "quit"])).unwrap();
/// assert_eq!(code, 0);
/// assert!(out.contents().ends_with("Hello, Ada!\nGoodbye!\n"));
/// ```
pub struct Prompt {
    registry: Registry,
    session: Session,
}

impl Prompt {
    /// Create a prompt over an existing registry and session.
    pub fn new(registry: Registry, session: Session) -> Self {
        Self { registry, session }
    }

    /// Build registry and session from `config`, talking over stdin/stdout.
    pub fn from_config(mut config: SessionConfig) -> Self {
        let registry = config.take_registry();
        Self::new(registry, Session::stdio(config))
    }

    /// Build registry and session from `config` with explicit action streams.
    pub fn with_io(
        mut config: SessionConfig,
        input: Box<dyn LineInput>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        let registry = config.take_registry();
        Self::new(registry, Session::new(config, input, output))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Print the welcome message and run with the configured prompt text.
    pub fn start(&mut self, reader: &mut dyn LineReader) -> Result<ExitCode, DispatchError> {
        let welcome = self.session.config.welcome_msg.clone();
        self.print_line(&welcome)?;
        let prompt = self.session.config.prompt.clone();
        self.run(reader, &prompt)
    }

    /// Main loop: handle commands as they are typed until `quit`.
    ///
    /// Returns the exit status of a normal end, after printing the farewell.
    /// Fatal errors are logged and returned; the farewell is not printed.
    pub fn run(
        &mut self,
        reader: &mut dyn LineReader,
        prompt: &str,
    ) -> Result<ExitCode, DispatchError> {
        loop {
            let line = match reader.read_line(prompt) {
                Ok(ReadLine::Line(line)) => line,
                Ok(ReadLine::Eof) => {
                    debug!("End of input, leaving prompt");
                    break;
                }
                Ok(ReadLine::Interrupted) => return Err(DispatchError::Interrupted),
                Err(err) => {
                    let err = DispatchError::Io(err.to_string());
                    error!("{}", err);
                    return Err(err);
                }
            };

            if line == QUIT {
                break;
            }

            match self.handle_cmd(&line) {
                Ok(_) => {}
                Err(err) if err.is_fatal() => {
                    error!("{}", err);
                    error!("Exiting execution");
                    return Err(err);
                }
                Err(err) => error!("{}", err),
            }
        }

        self.print_line(FAREWELL)?;
        Ok(0)
    }

    /// Resolve one input line and run its command.
    ///
    /// An empty registry is a fatal configuration error. A name the
    /// registry doesn't know is ignored.
    pub fn handle_cmd(&mut self, cmd: &str) -> Result<Outcome, DispatchError> {
        if self.registry.is_empty() {
            return Err(DispatchError::RegistryUnset);
        }

        let descriptor = match self.registry.resolve(cmd) {
            Some(resolved) => resolved?,
            None => {
                debug!("No command registered as [{}]", cmd);
                if self.session.config.report_unknown {
                    self.print_line(&format!("Unknown command: {}", cmd))?;
                }
                return Ok(Outcome::Ignored);
            }
        };

        debug!("Splitting command [{}] into atomic parts.", cmd);
        self.invoke(&descriptor).map(Outcome::Completed)
    }

    /// Run a validated descriptor under its execution policy.
    pub fn invoke(&mut self, descriptor: &CommandDescriptor) -> Result<Execution, DispatchError> {
        if descriptor.kind != CommandKind::SelfMethod {
            return Err(DispatchError::UnsupportedKind {
                command: descriptor.name.clone(),
            });
        }

        let action = descriptor.target_action;
        let args = descriptor.args.as_deref();
        if args.is_some() {
            debug!("Command has optional args, grabbing...");
        }

        if descriptor.thread_safe {
            debug!("Target is threadsafe, running in new thread.");
            run_isolated(&descriptor.name, &mut self.session, |session| {
                action.run(session, args)
            })?;
            Ok(Execution::Isolated)
        } else {
            debug!("Calling target in the main control flow");
            action
                .run(&mut self.session, args)
                .map_err(|err| action_failed(&descriptor.name, err))?;
            Ok(Execution::Inline)
        }
    }

    fn print_line(&mut self, line: &str) -> Result<(), DispatchError> {
        let out = self.session.output();
        writeln!(out, "{}", line)
            .and_then(|_| out.flush())
            .map_err(|err| DispatchError::Io(err.to_string()))
    }
}

/// Run `f` on a dedicated worker and wait for it.
///
/// The worker borrows `session` for its whole life, so nothing else can touch
/// it until the join. A panic inside `f` is caught at the join and reported
/// as [`DispatchError::ActionPanicked`] instead of unwinding into the caller.
pub fn run_isolated<F>(name: &str, session: &mut Session, f: F) -> Result<(), DispatchError>
where
    F: FnOnce(&mut Session) -> anyhow::Result<()> + Send,
{
    thread::scope(|scope| -> Result<(), DispatchError> {
        let worker = thread::Builder::new()
            .name(format!("cmd-{}", name))
            .spawn_scoped(scope, move || f(session))
            .map_err(|err| action_failed(name, err.into()))?;

        match worker.join() {
            Ok(result) => result.map_err(|err| action_failed(name, err)),
            Err(payload) => Err(DispatchError::ActionPanicked {
                command: name.to_string(),
                message: panic_message(&*payload),
            }),
        }
    })
}

fn action_failed(name: &str, err: anyhow::Error) -> DispatchError {
    DispatchError::ActionFailed {
        command: name.to_string(),
        reason: format!("{:#}", err),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
