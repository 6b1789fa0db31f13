//! CLI argument parsing.
//!
//! Each subcommand maps onto one browsing operation; `shell` runs them
//! interactively against a single loaded corpus.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "sview",
    version,
    about = "Browse, search, and page through a game project's scripts",
    after_help = "Examples:\n  sview --corpus scripts.json named Scene_\n  sview --corpus scripts/ defining Window_Base\n  sview --corpus scripts.json line Game_Actor 120 --surround 3\n  sview --corpus scripts.json find Game_Actor#level_up\n  sview --corpus scripts.json shell",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Script corpus: a JSON export or a directory of script files
    #[arg(long, value_name = "PATH", global = true)]
    pub corpus: Option<PathBuf>,

    /// Config file (defaults to <config dir>/sview/config.json when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Lines shown per page
    #[arg(long, value_name = "N", global = true)]
    pub lines_per_page: Option<usize>,

    /// Emit debug logs to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Page every non-blank script whose name contains NAME
    Browse {
        name: String,
    },
    /// Print the lines around LINE (0-based) of the first script named like NAME
    Line {
        name: String,
        line: usize,
        /// Lines shown on each side of LINE
        #[arg(long, value_name = "N")]
        surround: Option<usize>,
    },
    /// List non-blank scripts whose name contains QUERY
    Named {
        query: String,
        /// Treat QUERY as a regular expression
        #[arg(long)]
        regex: bool,
    },
    /// List scripts containing `class SYMBOL` or `module SYMBOL`
    Defining {
        symbol: String,
    },
    /// Page a script starting at a method definition (Type#method or Type.method)
    Find {
        signature: String,
    },
    /// Summarize the loaded corpus
    Info,
    /// Run operations interactively
    Shell,
}
