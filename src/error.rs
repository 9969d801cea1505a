//! Errors raised by the symbol table, the reference parser and the resolver.

use crate::kind::SymbolKind;
use crate::reference::SourceLocation;

/// Result alias for cross-reference operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal cross-reference error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Role token does not follow the markup grammar
    #[error("malformed reference `{token}`: {reason}")]
    MalformedReference {
        token: String,
        reason: String,
        location: Option<SourceLocation>,
    },

    /// Reference matches no registered symbol, or more than one
    #[error("{}", unresolved_message(.kind, .target, .tried, .candidates))]
    UnresolvedReference {
        kind: SymbolKind,
        target: String,
        /// Qualified names that were looked up, in order
        tried: Vec<String>,
        /// Symbols a bare target matched across modules (ambiguity when non-empty)
        candidates: Vec<String>,
        location: Option<SourceLocation>,
    },

    /// Table lookup miss
    #[error("unknown {kind} `{name}`")]
    UnknownSymbol { kind: SymbolKind, name: String },

    /// (kind, qualified name) registered twice
    #[error("duplicate {kind} `{name}`")]
    DuplicateSymbol { kind: SymbolKind, name: String },

    /// Qualified name has the wrong shape for its kind
    #[error("invalid {kind} name `{name}`: expected {expected} dot-separated identifiers")]
    InvalidSymbolName {
        kind: SymbolKind,
        name: String,
        expected: usize,
    },
}

fn unresolved_message(
    kind: &SymbolKind,
    target: &str,
    tried: &[String],
    candidates: &[String],
) -> String {
    if candidates.is_empty() {
        if tried.is_empty() {
            format!("unresolved {kind} reference `{target}`")
        } else {
            format!(
                "unresolved {kind} reference `{target}` (tried: {})",
                tried.join(", ")
            )
        }
    } else {
        format!(
            "ambiguous {kind} reference `{target}`, possible resolutions: {}",
            candidates.join(", ")
        )
    }
}

impl Error {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            token: token.to_string(),
            reason: reason.into(),
            location: None,
        }
    }

    /// Source location of the offending reference, when known
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::MalformedReference { location, .. }
            | Self::UnresolvedReference { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Attach a source location to a reference error
    pub fn at(mut self, loc: SourceLocation) -> Self {
        match &mut self {
            Self::MalformedReference { location, .. }
            | Self::UnresolvedReference { location, .. } => *location = Some(loc),
            _ => {}
        }
        self
    }

    /// Whether this is the ambiguous flavour of an unresolved reference
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::UnresolvedReference { candidates, .. } if !candidates.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message_lists_tried_names() {
        let err = Error::UnresolvedReference {
            kind: SymbolKind::Struct,
            target: "Work".to_string(),
            tried: vec!["tutorial.Work".to_string()],
            candidates: vec![],
            location: None,
        };
        assert_eq!(
            err.to_string(),
            "unresolved struct reference `Work` (tried: tutorial.Work)"
        );
        assert!(!err.is_ambiguous());
    }

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = Error::UnresolvedReference {
            kind: SymbolKind::Struct,
            target: "Work".to_string(),
            tried: vec![],
            candidates: vec!["a.Work".to_string(), "b.Work".to_string()],
            location: None,
        };
        assert_eq!(
            err.to_string(),
            "ambiguous struct reference `Work`, possible resolutions: a.Work, b.Work"
        );
        assert!(err.is_ambiguous());
    }

    #[test]
    fn test_location_only_on_reference_errors() {
        let loc = SourceLocation::new("index.rst", 3, 7);
        let err = Error::malformed("`<Example`", "unbalanced angle brackets").at(loc.clone());
        assert_eq!(err.location(), Some(&loc));

        let err = Error::DuplicateSymbol {
            kind: SymbolKind::Module,
            name: "Example".to_string(),
        }
        .at(loc);
        assert_eq!(err.location(), None);
    }
}
