use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;
use std::io::{BufRead, Result as IoResult, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// One read from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    Line(String),
    /// End of input (Ctrl-D).
    Eof,
    /// The user pressed Ctrl-C.
    Interrupted,
}

/// Source of command lines for the dispatch loop.
pub trait LineReader {
    /// Show `prompt` and read the next line, without its newline.
    fn read_line(&mut self, prompt: &str) -> IoResult<ReadLine>;
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> IoResult<ReadLine> {
        match self.readline(prompt) {
            Ok(line) => Ok(ReadLine::Line(line)),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(std::io::Error::other(err.to_string())),
        }
    }
}

/// Line-at-a-time input actions read answers from.
///
/// Any `BufRead` works; [`StdinLines`] covers the process' standard input.
pub trait LineInput: Send {
    /// Append one line, including its newline, to `buf`. Returns 0 at end of input.
    fn read_line(&mut self, buf: &mut String) -> IoResult<usize>;
}

impl<T: BufRead + Send> LineInput for T {
    fn read_line(&mut self, buf: &mut String) -> IoResult<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Standard input without a private buffer.
///
/// Each read locks the process-wide stdin handle and takes a single line, so
/// whatever follows stays buffered for the prompt's own line reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinLines;

impl LineInput for StdinLines {
    fn read_line(&mut self, buf: &mut String) -> IoResult<usize> {
        BufRead::read_line(&mut std::io::stdin().lock(), buf)
    }
}

/// Line reader fed from a fixed script, for driving a session without a terminal.
///
/// Reports [`ReadLine::Eof`] once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, one per read.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> IoResult<ReadLine> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().map_or(ReadLine::Eof, ReadLine::Line))
    }
}

/// Memory-backed writer for capturing session output.
///
/// Clones share one buffer, so a caller can keep a handle while the session
/// (and any worker it hands itself to) owns the other.
#[derive(Debug, Clone, Default)]
pub struct SharedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_reader_ends_with_eof() {
        let mut reader = ScriptedReader::new(["hello", "quit"]);
        assert_eq!(reader.read_line(">>> ").unwrap(), ReadLine::Line("hello".into()));
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_line(">>> ").unwrap(), ReadLine::Line("quit".into()));
        assert_eq!(reader.read_line(">>> ").unwrap(), ReadLine::Eof);
        assert_eq!(reader.prompts().len(), 3);
    }

    #[test]
    fn test_shared_writer_clones_share_buffer() {
        let writer = SharedWriter::new();
        let mut other = writer.clone();
        write!(other, "Hello, ").unwrap();
        std::thread::spawn(move || writeln!(other, "world!").unwrap())
            .join()
            .unwrap();
        assert_eq!(writer.contents(), "Hello, world!\n");
    }
}
