//! Ordered, read-only script collection and its lookup primitives.
//!
//! Record order is load order. Name lookups return lists and never fail;
//! operations that need exactly one script report [`ScriptError`] instead.
use crate::error::ScriptError;
use crate::record::ScriptRecord;
use crate::signature::{last_segment, Signature, SignatureResolver};
use anyhow::Result;
use regex::Regex;

/// Window of lines cut out of one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub lines: &'a [String],
    /// Index of `lines[0]` within the script.
    pub start: usize,
    pub count: usize,
}

/// Record index and 0-based line produced by signature lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub record: usize,
    pub line: usize,
}

#[derive(Debug, Default)]
pub struct ScriptRepository {
    records: Vec<ScriptRecord>,
}

impl ScriptRepository {
    /// Build from `(name, text)` pairs, assigning origins in iteration order.
    pub fn from_pairs<I, N, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let records = pairs
            .into_iter()
            .enumerate()
            .map(|(origin, (name, text))| ScriptRecord::new(name, text.as_ref(), origin))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[ScriptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScriptRecord> {
        self.records.get(index)
    }

    /// Names of non-blank records whose name contains `query`.
    pub fn named(&self, query: &str) -> Vec<&str> {
        self.non_blank_names(|name| name.contains(query))
    }

    /// Names of non-blank records whose name matches `pattern`.
    pub fn named_matching(&self, pattern: &Regex) -> Vec<&str> {
        self.non_blank_names(|name| pattern.is_match(name))
    }

    fn non_blank_names(&self, mut matches: impl FnMut(&str) -> bool) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| matches(record.name()) && !record.is_blank())
            .map(ScriptRecord::name)
            .collect()
    }

    /// Non-blank records whose name contains `query`, in order.
    pub fn matching(&self, query: &str) -> Vec<&ScriptRecord> {
        self.records
            .iter()
            .filter(|record| record.name().contains(query) && !record.is_blank())
            .collect()
    }

    /// Names of records containing `class <symbol>` or `module <symbol>`.
    ///
    /// Only the last `::` segment of `symbol` is searched for. Matching is a
    /// plain substring test, so `Scene_` finds every `Scene_*` class.
    pub fn defining(&self, symbol: &str) -> Vec<&str> {
        let symbol = last_segment(symbol);
        let class_form = format!("class {symbol}");
        let module_form = format!("module {symbol}");
        self.records
            .iter()
            .filter(|record| {
                record
                    .code()
                    .iter()
                    .any(|line| line.contains(&class_form) || line.contains(&module_form))
            })
            .map(ScriptRecord::name)
            .collect()
    }

    /// First record whose name contains `query`, blank or not.
    pub fn first_named(&self, query: &str) -> Result<&ScriptRecord, ScriptError> {
        self.records
            .iter()
            .find(|record| record.name().contains(query))
            .ok_or_else(|| ScriptError::not_found(query))
    }

    /// Lines `line - surround ..= line + surround` of the first record whose
    /// name contains `name`, clamped to the script's bounds.
    pub fn chunk_around(&self, name: &str, line: usize, surround: usize) -> Result<Chunk<'_>> {
        let record = self.first_named(name)?;
        let (start, stop) = chunk_bounds(record.line_count(), line, surround);
        let lines = &record.code()[start..stop];
        Ok(Chunk {
            lines,
            start,
            count: lines.len(),
        })
    }

    /// Resolve `signature` through `resolver` and map the reported location
    /// back onto this repository's order.
    pub fn locate_by_signature(
        &self,
        signature: &str,
        resolver: &dyn SignatureResolver,
    ) -> Result<Located> {
        let parsed = Signature::parse(signature).ok_or_else(|| {
            ScriptError::unresolved(signature, "expected Type#method or Type.method")
        })?;
        let location = resolver
            .resolve(&parsed)
            .ok_or_else(|| ScriptError::unresolved(signature, "no matching definition"))?;
        let record = self
            .records
            .iter()
            .position(|record| record.origin() == location.origin)
            .ok_or_else(|| {
                ScriptError::unresolved(
                    signature,
                    format!("location origin {} is not loaded", location.origin),
                )
            })?;
        let line = location.line.saturating_sub(1);
        tracing::debug!(%parsed, record, line, "located signature");
        Ok(Located { record, line })
    }
}

/// Half-open `[start, stop)` range for a chunk of `len` lines.
///
/// Saturating arithmetic keeps the window inside the text however far
/// `line` or `surround` overshoot it.
fn chunk_bounds(len: usize, line: usize, surround: usize) -> (usize, usize) {
    let start = line
        .saturating_sub(surround)
        .min(len.saturating_sub(surround))
        .min(len);
    let stop = line.saturating_add(surround).min(len).max(surround).min(len);
    // `stop` is inclusive; lines past the end do not exist.
    let end = stop.saturating_add(1).min(len);
    if end <= start {
        return (start, start);
    }
    (start, end)
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
