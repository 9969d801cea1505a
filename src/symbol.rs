//! Qualified names and the symbols registered for documented objects.

use crate::error::{Error, Result};
use crate::kind::SymbolKind;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Thrift identifier: a letter or underscore, then letters, digits, underscores
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// Check a single name segment against the Thrift identifier grammar
pub fn is_identifier(segment: &str) -> bool {
    IDENTIFIER.is_match(segment)
}

/// Dot-separated, ordered sequence of identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct QualifiedName(Vec<String>);

impl QualifiedName {
    /// Build from segments that were already validated
    pub(crate) fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse `Module.Name[.Sub]`, rejecting empty or non-identifier segments
    pub fn parse(name: &str) -> Option<Self> {
        let segments: Vec<String> = name.split('.').map(str::to_string).collect();
        if segments.iter().all(|s| is_identifier(s)) {
            Some(Self(segments))
        } else {
            None
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First segment: the defining module
    pub fn module(&self) -> &str {
        self.0.first().map_or("", String::as_str)
    }

    /// Last segment
    pub fn name(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// Name without its last segment (`Example.Operation` for `Example.Operation.ADD`)
    pub fn parent(&self) -> Option<QualifiedName> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Prepend a module segment
    pub fn within(module: &str, rest: &[String]) -> Self {
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(module.to_string());
        segments.extend(rest.iter().cloned());
        Self(segments)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

/// A documented Thrift object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub qualified_name: QualifiedName,
}

impl Symbol {
    /// Create a symbol from its fully-qualified name.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSymbolName`] if the name is not made of
    /// identifiers or has the wrong number of segments for `kind`.
    pub fn new(kind: SymbolKind, qualified_name: &str) -> Result<Self> {
        let invalid = || Error::InvalidSymbolName {
            kind,
            name: qualified_name.to_string(),
            expected: kind.qualified_len(),
        };
        let name = QualifiedName::parse(qualified_name).ok_or_else(invalid)?;
        if name.len() != kind.qualified_len() {
            return Err(invalid());
        }
        Ok(Self {
            kind,
            qualified_name: name,
        })
    }

    /// Module the symbol is defined in
    pub fn defining_module(&self) -> &str {
        self.qualified_name.module()
    }

    /// Qualified name without the module (`Operation.ADD`); a module's own name
    pub fn short_name(&self) -> String {
        match self.kind {
            SymbolKind::Module => self.qualified_name.to_string(),
            _ => self.qualified_name.segments()[1..].join("."),
        }
    }

    /// Owning symbol of a member (`enum Example.Operation` for an enum field)
    pub fn owner(&self) -> Option<(SymbolKind, QualifiedName)> {
        let kind = self.kind.owner()?;
        Some((kind, self.qualified_name.parent()?))
    }

    /// Anchor identifier used as link destination: `Example.Operation.ADD:enum_field`
    pub fn anchor(&self) -> String {
        format!("{}:{}", self.qualified_name, self.kind)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name)
    }
}
