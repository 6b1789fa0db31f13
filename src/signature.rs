//! Method signatures and the capability that maps them to source locations.
//!
//! A signature names a member of a type: `Type#method` for an instance
//! method, `Type.method` for a type-level one. Resolution is delegated to a
//! [`SignatureResolver`] so the repository never depends on how locations are
//! discovered.
use crate::record::ScriptRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Whether a member is called on instances or on the type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Instance,
    TypeLevel,
}

/// Parsed `Type#method` / `Type.method` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub type_name: String,
    pub member: String,
    pub kind: MemberKind,
}

impl Signature {
    /// Parse a signature, returning `None` when either side is missing.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (split_at, kind) = match raw.rfind('#') {
            Some(idx) => (idx, MemberKind::Instance),
            None => (raw.rfind('.')?, MemberKind::TypeLevel),
        };
        let type_name = raw[..split_at].trim();
        let member = raw[split_at + 1..].trim();
        if type_name.is_empty() || member.is_empty() {
            return None;
        }
        Some(Self {
            type_name: type_name.to_string(),
            member: member.to_string(),
            kind,
        })
    }

    /// Final `::` segment of the type name.
    pub fn short_type_name(&self) -> &str {
        last_segment(&self.type_name)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = match self.kind {
            MemberKind::Instance => '#',
            MemberKind::TypeLevel => '.',
        };
        write!(f, "{}{sep}{}", self.type_name, self.member)
    }
}

/// Where a resolver found a member: the record's load-order origin and a
/// 1-based line number, the way a host runtime reports source locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub origin: usize,
    pub line: usize,
}

/// Host capability mapping a type + member to a source location.
pub trait SignatureResolver {
    fn resolve(&self, signature: &Signature) -> Option<SourceLocation>;
}

pub(crate) fn last_segment(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// Resolver built by scanning script text for `class`/`module` headers and
/// `def` lines.
///
/// Nesting is tracked by indentation: an `end` closes the innermost open
/// header at the same indent. Later definitions replace earlier ones, so a
/// reopened class reports its most recent override.
#[derive(Debug, Default)]
pub struct TextualResolver {
    definitions: HashMap<(String, String, MemberKind), SourceLocation>,
}

struct OpenScope {
    type_name: String,
    indent: usize,
    singleton: bool,
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)(?:class|module)\s+([A-Z][\w:]*)").expect("compile header regex")
    })
}

fn singleton_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)class\s*<<\s*self\b").expect("compile singleton regex"))
}

fn def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*def\s+(self\.)?([A-Za-z_][\w]*[?!=]?|\[\]=?|[-+*/%<>=!~^&|]+)")
            .expect("compile def regex")
    })
}

fn end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)end\b").expect("compile end regex"))
}

impl TextualResolver {
    pub fn index(records: &[ScriptRecord]) -> Self {
        let mut resolver = Self::default();
        for record in records {
            resolver.index_record(record);
        }
        tracing::debug!(
            definitions = resolver.definitions.len(),
            "indexed method definitions"
        );
        resolver
    }

    fn index_record(&mut self, record: &ScriptRecord) {
        let mut scopes: Vec<OpenScope> = Vec::new();
        for (idx, line) in record.code().iter().enumerate() {
            if let Some(caps) = singleton_re().captures(line) {
                if let Some(outer) = scopes.last() {
                    let type_name = outer.type_name.clone();
                    scopes.push(OpenScope {
                        type_name,
                        indent: caps[1].len(),
                        singleton: true,
                    });
                }
                continue;
            }
            if let Some(caps) = header_re().captures(line) {
                scopes.push(OpenScope {
                    type_name: last_segment(&caps[2]).to_string(),
                    indent: caps[1].len(),
                    singleton: false,
                });
                continue;
            }
            if let Some(caps) = def_re().captures(line) {
                let Some(scope) = scopes.last() else {
                    continue;
                };
                let kind = if caps.get(1).is_some() || scope.singleton {
                    MemberKind::TypeLevel
                } else {
                    MemberKind::Instance
                };
                let location = SourceLocation {
                    origin: record.origin(),
                    line: idx + 1,
                };
                self.definitions.insert(
                    (scope.type_name.clone(), caps[2].to_string(), kind),
                    location,
                );
                continue;
            }
            if let Some(caps) = end_re().captures(line) {
                let indent = caps[1].len();
                if scopes.last().is_some_and(|scope| scope.indent == indent) {
                    scopes.pop();
                }
            }
        }
    }
}

impl SignatureResolver for TextualResolver {
    fn resolve(&self, signature: &Signature) -> Option<SourceLocation> {
        let key = (
            signature.short_type_name().to_string(),
            signature.member.clone(),
            signature.kind,
        );
        self.definitions.get(&key).copied()
    }
}
