//! Interactive pager over a snapshot of lines.
//!
//! A pager is built per invocation and owns its text. `position` marks the
//! end of what has been shown: each render shows up to one page ending at
//! the cursor, then the pager either waits for a command or finishes.
//!
//! ```text
//! Idle --advance--> Rendering --more left--> AwaitingCommand --command--> Rendering
//!                       |                          |
//!                       +--end of text--> Done <---+--quit / end of input
//! ```
mod command;

pub use command::{parse_command, PagerCommand};

use crate::console::Console;
use anyhow::Result;
use std::ops::Range;

const PROMPT: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    Idle,
    Rendering,
    AwaitingCommand,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerSettings {
    pub lines_per_page: usize,
    /// Unknown commands tolerated in a row before the pager gives up.
    pub max_invalid_commands: usize,
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            lines_per_page: 20,
            max_invalid_commands: 10,
        }
    }
}

#[derive(Debug)]
pub struct Pager {
    settings: PagerSettings,
    text: Vec<String>,
    position: usize,
    state: PagerState,
}

impl Pager {
    pub fn new(settings: PagerSettings) -> Self {
        Self {
            settings: PagerSettings {
                lines_per_page: settings.lines_per_page.max(1),
                ..settings
            },
            text: Vec::new(),
            position: 0,
            state: PagerState::Idle,
        }
    }

    /// Replace the text and place the cursor at `initial_position`.
    pub fn reset(&mut self, text: Vec<String>, initial_position: usize) {
        self.position = initial_position.min(text.len());
        self.text = text;
        self.state = PagerState::Idle;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn describe(&self) -> String {
        format!(
            "{} lines, {} shown",
            self.text.len(),
            self.settings.lines_per_page
        )
    }

    /// Show the first page from the current position and keep paging until
    /// the text runs out or the user quits.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<usize> {
        self.advance(console, self.page_delta())
    }

    /// Move the cursor by `delta` lines, render, and loop on commands.
    ///
    /// Returns the final cursor, which never exceeds the text length.
    pub fn advance(&mut self, console: &mut dyn Console, delta: i64) -> Result<usize> {
        let mut delta = delta;
        loop {
            if self.position >= self.text.len() {
                self.state = PagerState::Done;
                break;
            }
            let window = self.move_cursor(delta);
            self.state = PagerState::Rendering;
            for line in &self.text[window] {
                console.print_line(line)?;
            }
            if self.position >= self.text.len() {
                self.state = PagerState::Done;
                break;
            }
            self.state = PagerState::AwaitingCommand;
            match self.next_command(console)? {
                Some(next) => delta = next,
                None => {
                    self.state = PagerState::Done;
                    break;
                }
            }
        }
        Ok(self.position.min(self.text.len()))
    }

    fn page_delta(&self) -> i64 {
        i64::try_from(self.settings.lines_per_page).unwrap_or(i64::MAX)
    }

    /// Apply `delta` and return the lines to render.
    ///
    /// Forward moves stop at the end of the text and never repeat lines that
    /// were already shown; backward moves stop at the first page.
    fn move_cursor(&mut self, delta: i64) -> Range<usize> {
        let len = self.text.len() as i64;
        let page = self.page_delta();
        let previous = self.position as i64;
        let mut target = previous.saturating_add(delta);
        if delta < 0 {
            target = target.max(page.min(len));
        }
        let target = target.clamp(0, len);
        self.position = target as usize;

        let mut start = target.saturating_sub(page).max(0);
        if delta > 0 {
            start = start.max(previous);
        }
        start as usize..self.position
    }

    /// Read until a valid command arrives. `None` ends the session.
    fn next_command(&self, console: &mut dyn Console) -> Result<Option<i64>> {
        let page = self.page_delta();
        for _ in 0..=self.settings.max_invalid_commands {
            let Some(input) = console.read_line(PROMPT)? else {
                return Ok(None);
            };
            match parse_command(&input) {
                Some(PagerCommand::Forward) => return Ok(Some(page)),
                Some(PagerCommand::Back) => return Ok(Some(page.saturating_neg())),
                Some(PagerCommand::Pages(count)) => return Ok(Some(page.saturating_mul(count))),
                Some(PagerCommand::Quit) => return Ok(None),
                None => {
                    tracing::debug!(input = %input, "unknown pager command");
                    console.print_line(&format!(
                        "unknown command {input:?}: use enter or >, <, a page count (-99..99), or q"
                    ))?;
                }
            }
        }
        tracing::warn!(
            limit = self.settings.max_invalid_commands,
            "too many unknown commands, closing pager"
        );
        console.print_line("too many unknown commands; closing pager")?;
        Ok(None)
    }
}
