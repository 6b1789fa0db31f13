//! Line-oriented input/output channel used by the pager and the shell.
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Prints lines and reads one line of input at a time.
pub trait Console {
    fn print_line(&mut self, line: &str) -> Result<()>;

    /// Show `prompt` and block for one line. `None` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Console over any reader/writer pair; `StdConsole::stdio()` binds the
/// process's stdin and stdout.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<io::StdinLock<'static>, io::StdoutLock<'static>> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout().lock())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn print_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("write to console")
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("write prompt")?;
        self.output.flush().context("flush console")?;
        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("read console input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }
}

/// In-memory console fed from a fixed list of replies.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: std::collections::VecDeque<String>,
    pub printed: Vec<String>,
    pub prompts: usize,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            printed: Vec::new(),
            prompts: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn print_line(&mut self, line: &str) -> Result<()> {
        self.printed.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        self.prompts += 1;
        Ok(self.replies.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_console_strips_line_endings() {
        let input = io::Cursor::new("first\r\nsecond\n");
        let mut output = Vec::new();
        let mut console = StdConsole::new(input, &mut output);
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line("> ").unwrap(), None);
        console.print_line("done").unwrap();
        drop(console);
        assert_eq!(String::from_utf8(output).unwrap(), "> > > done\n");
    }

    #[test]
    fn scripted_console_records_output() {
        let mut console = ScriptedConsole::new(["q"]);
        console.print_line("hello").unwrap();
        assert_eq!(console.read_line("").unwrap().as_deref(), Some("q"));
        assert_eq!(console.read_line("").unwrap(), None);
        assert_eq!(console.printed, ["hello"]);
        assert_eq!(console.prompts, 2);
    }
}
