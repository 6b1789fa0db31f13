//! Failures raised by operations that must target exactly one script.
//!
//! Lookups that return lists never fail; absence is an empty list. The
//! variants here travel inside `anyhow::Error` and can be recovered with
//! `downcast_ref` when a caller needs to tell them apart.

/// Error for single-target script operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// No record name contains the query.
    NotFound { query: String },
    /// The signature is malformed or the resolver could not place it.
    UnresolvedSignature { signature: String, reason: String },
}

impl ScriptError {
    pub fn not_found(query: &str) -> Self {
        Self::NotFound {
            query: query.to_string(),
        }
    }

    pub fn unresolved(signature: &str, reason: impl Into<String>) -> Self {
        Self::UnresolvedSignature {
            signature: signature.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { query } => write!(f, "no script named like {query:?}"),
            Self::UnresolvedSignature { signature, reason } => {
                write!(f, "cannot resolve {signature:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Find a `ScriptError` anywhere in an anyhow chain.
pub fn script_error(err: &anyhow::Error) -> Option<&ScriptError> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ScriptError>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn script_error_survives_added_context() {
        let result = Err::<(), _>(ScriptError::not_found("Scene_")).context("browse Scene_");
        let err = result.unwrap_err();
        assert_eq!(
            script_error(&err),
            Some(&ScriptError::not_found("Scene_"))
        );
    }

    #[test]
    fn display_names_the_query() {
        let err = ScriptError::unresolved("Foo#bar", "no such type");
        assert_eq!(err.to_string(), "cannot resolve \"Foo#bar\": no such type");
    }
}
