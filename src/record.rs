//! A single named script and its lines.

/// One script as loaded from the corpus.
///
/// `origin` is the record's position in the store it was loaded from; the
/// signature resolver reports locations in those terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    name: String,
    code: Vec<String>,
    origin: usize,
}

impl ScriptRecord {
    pub fn new(name: impl Into<String>, text: &str, origin: usize) -> Self {
        Self {
            name: name.into(),
            code: split_lines(text),
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &[String] {
        &self.code
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn line_count(&self) -> usize {
        self.code.len()
    }

    /// True when the script holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.code.iter().all(|line| line.trim().is_empty())
    }
}

fn split_lines(text: &str) -> Vec<String> {
    // str::lines drops a trailing "\r" and does not yield an empty final line.
    text.lines().map(str::to_string).collect()
}
