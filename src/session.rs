use crate::config::SessionConfig;
use crate::io_adapters::{LineInput, StdinLines};
use std::io::Write;

/// Long-lived state shared by every action of one prompt session.
///
/// The session contains:
/// - `config`: the typed configuration the session was started with.
/// - `nickname`: written by the nickname action, read by the others.
/// - the input and output streams actions talk to the user through.
///
/// Actions run one at a time, even when dispatched to a worker, so the
/// session is handed out as `&mut` and needs no locking. It must be `Send`
/// so the worker can borrow it.
pub struct Session {
    pub config: SessionConfig,
    pub nickname: Option<String>,
    input: Box<dyn LineInput>,
    output: Box<dyn Write + Send>,
}

impl Session {
    /// Create a session reading from `input` and writing to `output`.
    pub fn new(
        config: SessionConfig,
        input: Box<dyn LineInput>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            config,
            nickname: None,
            input,
            output,
        }
    }

    /// Session attached to the process' standard streams.
    pub fn stdio(config: SessionConfig) -> Self {
        Self::new(
            config,
            Box::new(StdinLines),
            Box::new(std::io::stdout()),
        )
    }

    /// Name to address the user by: the nickname if one was set.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.config.name)
    }

    /// Look up a pass-through configuration value.
    pub fn extra(&self, key: &str) -> Option<&toml::Value> {
        self.config.extra.get(key)
    }

    /// Stream actions write their output to.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    /// Print `question` and read one line of answer.
    ///
    /// Returns `None` at end of input. The trailing newline is stripped.
    pub fn ask(&mut self, question: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::io_adapters::SharedWriter;
    use crate::session::Session;
    use std::io::Cursor;

    fn session(input: &str) -> (Session, SharedWriter) {
        let out = SharedWriter::new();
        let session = Session::new(
            SessionConfig::default(),
            Box::new(Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
        );
        (session, out)
    }

    #[test]
    fn test_display_name_prefers_nickname() {
        let (mut session, _) = session("");
        assert_eq!(session.display_name(), "User");
        session.nickname = Some("Bee".to_string());
        assert_eq!(session.display_name(), "Bee");
    }

    #[test]
    fn test_ask_reads_one_line() {
        let (mut session, out) = session("first\r\nsecond\n");
        assert_eq!(session.ask("? ").unwrap(), Some("first".to_string()));
        assert_eq!(session.ask("? ").unwrap(), Some("second".to_string()));
        assert_eq!(session.ask("? ").unwrap(), None);
        assert_eq!(out.contents(), "? ? ? ");
    }

    #[test]
    fn test_extra_lookup() {
        let (mut session, _) = session("");
        assert!(session.extra("team").is_none());
        session
            .config
            .extra
            .insert("team".to_string(), toml::Value::String("engines".into()));
        assert_eq!(session.extra("team").and_then(|v| v.as_str()), Some("engines"));
    }
}
