//! Public browsing operations over a loaded repository.
//!
//! Each paging call builds its own [`Pager`], so nothing is shared between
//! invocations except the read-only repository.
use crate::console::Console;
use crate::error::ScriptError;
use crate::pager::{Pager, PagerSettings, PagerState};
use crate::repository::ScriptRepository;
use crate::signature::SignatureResolver;
use anyhow::{Context, Result};

pub struct Session<'a> {
    repository: &'a ScriptRepository,
    resolver: &'a dyn SignatureResolver,
    settings: PagerSettings,
}

impl<'a> Session<'a> {
    pub fn new(
        repository: &'a ScriptRepository,
        resolver: &'a dyn SignatureResolver,
        settings: PagerSettings,
    ) -> Self {
        Self {
            repository,
            resolver,
            settings,
        }
    }

    pub fn repository(&self) -> &ScriptRepository {
        self.repository
    }

    /// Page through every non-blank script whose name contains `name`, one
    /// after another. Returns how many lines were shown.
    pub fn browse(&self, console: &mut dyn Console, name: &str) -> Result<usize> {
        let records = self.repository.matching(name);
        if records.is_empty() {
            return Err(ScriptError::not_found(name).into());
        }
        let text: Vec<String> = records
            .iter()
            .flat_map(|record| record.code().iter().cloned())
            .collect();
        tracing::debug!(query = name, scripts = records.len(), "browsing");
        self.page(console, text, 0)
    }

    /// Print the lines around `line` of the first script named like `name`.
    /// Returns the window size.
    pub fn line_around(
        &self,
        console: &mut dyn Console,
        name: &str,
        line: usize,
        surround: usize,
    ) -> Result<usize> {
        let chunk = self.repository.chunk_around(name, line, surround)?;
        tracing::debug!(
            query = name,
            start = chunk.start,
            count = chunk.count,
            "printing chunk"
        );
        for text in chunk.lines {
            console.print_line(text)?;
        }
        Ok(chunk.count)
    }

    pub fn named(&self, query: &str) -> Vec<&'a str> {
        self.repository.named(query)
    }

    pub fn defining(&self, symbol: &str) -> Vec<&'a str> {
        self.repository.defining(symbol)
    }

    /// Resolve `signature` and page its script starting at the definition.
    pub fn find(&self, console: &mut dyn Console, signature: &str) -> Result<usize> {
        let located = self
            .repository
            .locate_by_signature(signature, self.resolver)?;
        let record = self
            .repository
            .get(located.record)
            .with_context(|| format!("record {} vanished", located.record))?;
        tracing::debug!(
            signature,
            script = record.name(),
            line = located.line,
            "found definition"
        );
        self.page(console, record.code().to_vec(), located.line)
    }

    fn page(
        &self,
        console: &mut dyn Console,
        text: Vec<String>,
        position: usize,
    ) -> Result<usize> {
        let mut pager = Pager::new(self.settings);
        pager.reset(text, position);
        tracing::debug!(pager = %pager.describe(), position, "opening pager");
        let shown = pager.run(console)?;
        debug_assert_eq!(pager.state(), PagerState::Done);
        tracing::debug!(shown, cursor = pager.position(), "pager closed");
        Ok(shown)
    }
}
