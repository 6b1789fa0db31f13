//! The user-facing operations, shared by the subcommands and the shell.
use crate::console::Console;
use crate::error::script_error;
use crate::session::Session;
use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Browse {
        name: String,
    },
    Line {
        name: String,
        line: usize,
        surround: Option<usize>,
    },
    Named {
        query: String,
        regex: bool,
    },
    Defining {
        symbol: String,
    },
    Find {
        signature: String,
    },
    Info,
}

/// What an operation produced, for callers that report a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lines(usize),
    Names(usize),
    Summary,
}

impl Operation {
    pub fn execute(
        &self,
        session: &Session<'_>,
        console: &mut dyn Console,
        default_surround: usize,
    ) -> Result<Outcome> {
        match self {
            Operation::Browse { name } => session.browse(console, name).map(Outcome::Lines),
            Operation::Line {
                name,
                line,
                surround,
            } => session
                .line_around(console, name, *line, surround.unwrap_or(default_surround))
                .map(Outcome::Lines),
            Operation::Named { query, regex } => {
                let names = if *regex {
                    let pattern =
                        Regex::new(query).with_context(|| format!("invalid pattern {query:?}"))?;
                    session.repository().named_matching(&pattern)
                } else {
                    session.named(query)
                };
                print_names(console, &names)?;
                Ok(Outcome::Names(names.len()))
            }
            Operation::Defining { symbol } => {
                let names = session.defining(symbol);
                print_names(console, &names)?;
                Ok(Outcome::Names(names.len()))
            }
            Operation::Find { signature } => session.find(console, signature).map(Outcome::Lines),
            Operation::Info => {
                print_summary(session, console)?;
                Ok(Outcome::Summary)
            }
        }
    }
}

/// Run an operation, turning lookup failures and rejected patterns into a
/// printed message.
///
/// Anything else, such as console I/O, still propagates.
pub fn execute_reporting(
    operation: &Operation,
    session: &Session<'_>,
    console: &mut dyn Console,
    default_surround: usize,
) -> Result<Option<Outcome>> {
    let err = match operation.execute(session, console, default_surround) {
        Ok(outcome) => return Ok(Some(outcome)),
        Err(err) => err,
    };
    if let Some(script_err) = script_error(&err) {
        tracing::debug!(error = %script_err, "lookup failed");
        console.print_line(&script_err.to_string())?;
        return Ok(None);
    }
    if err.chain().any(|cause| cause.is::<regex::Error>()) {
        tracing::debug!(error = %err, "pattern rejected");
        console.print_line(&format!("{err:#}"))?;
        return Ok(None);
    }
    Err(err)
}

fn print_names(console: &mut dyn Console, names: &[&str]) -> Result<()> {
    if names.is_empty() {
        return console.print_line("(no matches)");
    }
    for name in names {
        console.print_line(name)?;
    }
    Ok(())
}

fn print_summary(session: &Session<'_>, console: &mut dyn Console) -> Result<()> {
    let records = session.repository().records();
    let non_blank = records.iter().filter(|record| !record.is_blank()).count();
    let lines: usize = records.iter().map(|record| record.line_count()).sum();
    console.print_line(&format!(
        "{} scripts ({} non-blank), {} lines",
        records.len(),
        non_blank,
        lines
    ))
}
