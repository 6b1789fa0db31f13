use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod console;
mod error;
mod loader;
mod operation;
mod pager;
mod record;
mod repository;
mod session;
mod shell;
mod signature;

use cli::{Command, RootArgs};
use config::{resolve_config, ConfigOverrides};
use console::StdConsole;
use operation::Operation;
use session::Session;
use signature::TextualResolver;

const LOG_ENV: &str = "SVIEW_LOG";

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_logging(args.verbose);

    let overrides = ConfigOverrides {
        lines_per_page: args.lines_per_page,
        corpus: args.corpus.clone(),
    };
    let config = resolve_config(args.config.as_deref(), &overrides)?;
    let corpus = config
        .corpus
        .as_deref()
        .ok_or_else(|| anyhow!("no corpus given: pass --corpus or set \"corpus\" in the config"))?;
    let repository = loader::load_corpus(corpus)?;
    let resolver = TextualResolver::index(repository.records());
    let session = Session::new(&repository, &resolver, config.pager_settings());
    let mut console = StdConsole::stdio();

    match operation_for(args.command) {
        Some(operation) => {
            operation.execute(&session, &mut console, config.surround)?;
        }
        None => {
            let executed = shell::run_shell(&session, &mut console, config.surround)?;
            tracing::debug!(executed, "shell closed");
        }
    }
    Ok(())
}

/// Map a subcommand onto its operation; `None` is the interactive shell.
fn operation_for(command: Command) -> Option<Operation> {
    let operation = match command {
        Command::Browse { name } => Operation::Browse { name },
        Command::Line {
            name,
            line,
            surround,
        } => Operation::Line {
            name,
            line,
            surround,
        },
        Command::Named { query, regex } => Operation::Named { query, regex },
        Command::Defining { symbol } => Operation::Defining { symbol },
        Command::Find { signature } => Operation::Find { signature },
        Command::Info => Operation::Info,
        Command::Shell => return None,
    };
    Some(operation)
}

/// Logs go to stderr so they never mix with paged output. `SVIEW_LOG` takes
/// an `EnvFilter` directive; `--verbose` lowers the default to debug.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
