//! Interactive prompt accepting the same operations as the subcommands.
use crate::console::Console;
use crate::operation::{execute_reporting, Operation};
use crate::session::Session;
use anyhow::{anyhow, Result};

const PROMPT: &str = "sview> ";

const HELP: &[&str] = &[
    "browse <name>                 page every script whose name contains <name>",
    "line <name> <line> [surround] print lines around <line> (0-based)",
    "named [--regex] <query>       list non-blank scripts named like <query>",
    "defining <symbol>             list scripts defining class/module <symbol>",
    "find <Type#method|Type.method> page a script from a method definition",
    "info                          corpus summary",
    "help                          this text",
    "quit                          leave the shell",
];

#[derive(Debug, PartialEq, Eq)]
enum ShellInput {
    Run(Operation),
    Help,
    Quit,
    Empty,
}

/// Read commands until `quit` or end of input. Returns how many operations
/// ran.
pub fn run_shell(
    session: &Session<'_>,
    console: &mut dyn Console,
    default_surround: usize,
) -> Result<usize> {
    let mut executed = 0;
    while let Some(line) = console.read_line(PROMPT)? {
        match parse_input(&line) {
            Ok(ShellInput::Run(operation)) => {
                tracing::debug!(?operation, "shell command");
                execute_reporting(&operation, session, console, default_surround)?;
                executed += 1;
            }
            Ok(ShellInput::Help) => {
                for help_line in HELP {
                    console.print_line(help_line)?;
                }
            }
            Ok(ShellInput::Quit) => break,
            Ok(ShellInput::Empty) => {}
            Err(err) => console.print_line(&format!("{err}; type help for commands"))?,
        }
    }
    Ok(executed)
}

fn parse_input(line: &str) -> Result<ShellInput> {
    let words = shell_words::split(line).map_err(|err| anyhow!("cannot parse input: {err}"))?;
    let Some((command, args)) = words.split_first() else {
        return Ok(ShellInput::Empty);
    };
    let operation = match (command.as_str(), args) {
        ("help" | "?", _) => return Ok(ShellInput::Help),
        ("quit" | "exit" | "q", _) => return Ok(ShellInput::Quit),
        ("info", []) => Operation::Info,
        ("browse", [name]) => Operation::Browse { name: name.clone() },
        ("line", [name, line]) => Operation::Line {
            name: name.clone(),
            line: parse_number(line, "line")?,
            surround: None,
        },
        ("line", [name, line, surround]) => Operation::Line {
            name: name.clone(),
            line: parse_number(line, "line")?,
            surround: Some(parse_number(surround, "surround")?),
        },
        ("named", [query]) => Operation::Named {
            query: query.clone(),
            regex: false,
        },
        ("named", [flag, query]) if flag == "--regex" => Operation::Named {
            query: query.clone(),
            regex: true,
        },
        ("defining", [symbol]) => Operation::Defining {
            symbol: symbol.clone(),
        },
        ("find", [signature]) => Operation::Find {
            signature: signature.clone(),
        },
        _ => return Err(anyhow!("unrecognized command {line:?}")),
    };
    Ok(ShellInput::Run(operation))
}

fn parse_number(raw: &str, what: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| anyhow!("{what} must be a non-negative number (got {raw:?})"))
}
