//! Navigation commands accepted at the pager prompt.
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerCommand {
    Forward,
    Back,
    /// Move by this many pages; negative moves up.
    Pages(i64),
    Quit,
}

fn pages_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d{1,2}$").expect("compile page count regex"))
}

/// Parse one line of prompt input. `None` means the input is not a command.
pub fn parse_command(input: &str) -> Option<PagerCommand> {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "" | ">" | "forward" | "next" | "down" => return Some(PagerCommand::Forward),
        "<" | "back" | "prev" | "previous" | "up" => return Some(PagerCommand::Back),
        _ => {}
    }
    if pages_re().is_match(&input) {
        return input.parse().ok().map(PagerCommand::Pages);
    }
    if input.starts_with('q') || input.starts_with("exit") {
        return Some(PagerCommand::Quit);
    }
    None
}
