//! Role token parsing.
//!
//! A reference is written as an inline role in one of two forms:
//!
//! - ``:thrift:enum_field:`Operation.ADD` ``
//! - ``:thrift:service_method:`Titled ref <Calculator.ping>` ``
//!
//! The content between backquotes is either a bare target or a display title
//! followed by the target in angle brackets.

use crate::error::{Error, Result};
use crate::kind::SymbolKind;
use crate::symbol::{QualifiedName, is_identifier};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Domain literal that prefixes every role
pub const DOMAIN: &str = "thrift";

/// Any role token, used to give precise errors for a single token
static ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z0-9_]+):([A-Za-z0-9_]+):`([^`]*)`$")
        .unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// Roles of this domain inside running text. Group 3 is empty when the
/// closing backquote is missing on the same line.
static ROLE_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":thrift:([A-Za-z0-9_]+):`([^`\n]*)(`?)")
        .unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// `Title <target>` form; the title is everything before the last `<`
static EXPLICIT_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*?)\s*<([^<>]*)>$").unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// reST inline literal on a single line: ``text``
static INLINE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"``[^`\n][^\n]*?``").unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// Directives whose indented body is verbatim code
static CODE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.\.[ \t]+(?:code-block|code|sourcecode)::")
        .unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// Position of a reference inside a documentation file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based line
    pub line: usize,
    /// 1-based column, in characters
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Reference target split into owner segments and final name.
///
/// For member kinds the owner is the enclosing type, optionally preceded by
/// a module (`Operation` or `Example.Operation`). For top-level kinds the
/// owner is the optional module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub owner: Vec<String>,
    pub name: String,
}

impl Target {
    /// Split and validate a target for `kind`
    fn split(kind: SymbolKind, target: &str, token: &str) -> Result<Self> {
        let mut segments: Vec<String> = Vec::new();
        for segment in target.split('.') {
            if segment.is_empty() {
                return Err(Error::malformed(token, format!("empty name component in `{target}`")));
            }
            if !is_identifier(segment) {
                return Err(Error::malformed(
                    token,
                    format!("`{segment}` is not a valid identifier"),
                ));
            }
            segments.push(segment.to_string());
        }

        if segments.len() < kind.min_target_len() {
            return Err(Error::malformed(
                token,
                format!("{kind} target must have the form `Owner.Name`"),
            ));
        }
        if segments.len() > kind.qualified_len() {
            return Err(Error::malformed(
                token,
                format!(
                    "too many name components for a {kind} target (at most {})",
                    kind.qualified_len()
                ),
            ));
        }

        let name = segments.pop().unwrap_or_default();
        Ok(Self {
            owner: segments,
            name,
        })
    }

    /// Number of dot-separated components
    pub fn component_count(&self) -> usize {
        self.owner.len() + 1
    }

    /// Whether the target already names its module
    pub fn is_qualified(&self, kind: SymbolKind) -> bool {
        self.component_count() == kind.qualified_len()
    }

    fn segments(&self) -> Vec<String> {
        let mut segments = self.owner.clone();
        segments.push(self.name.clone());
        segments
    }

    /// The target as a qualified name, as written
    pub fn as_qualified(&self) -> QualifiedName {
        QualifiedName::from_segments(self.segments())
    }

    /// The target with `module` prepended
    pub fn within(&self, module: &str) -> QualifiedName {
        QualifiedName::within(module, &self.segments())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for owner in &self.owner {
            write!(f, "{owner}.")?;
        }
        f.write_str(&self.name)
    }
}

/// A parsed role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: SymbolKind,
    /// Target text as written between the backquotes (or angle brackets)
    pub raw_target: String,
    pub target: Target,
    /// Explicit display title
    pub title: Option<String>,
    pub location: Option<SourceLocation>,
}

impl Reference {
    /// Text shown for the link: the explicit title, else the target as written
    pub fn display_text(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.raw_target)
    }

    /// Attach the position the reference was found at
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Parse a complete role token such as ``:thrift:enum:`Operation` ``.
///
/// # Errors
/// Returns [`Error::MalformedReference`] for a foreign domain, an unknown
/// kind, or content that [`parse_reference`] rejects.
pub fn parse_role(token: &str) -> Result<Reference> {
    let token = token.trim();
    let Some(caps) = ROLE.captures(token) else {
        return Err(Error::malformed(
            token,
            format!("expected :{DOMAIN}:kind:`target`"),
        ));
    };

    let domain = &caps[1];
    if domain != DOMAIN {
        return Err(Error::malformed(token, format!("unknown domain `{domain}`")));
    }
    let kind = parse_kind(&caps[2], token)?;
    parse_content(kind, &caps[3], token)
}

/// Parse the content of a role of the given kind (the text between backquotes).
///
/// # Errors
/// Returns [`Error::MalformedReference`] on an empty target, unbalanced angle
/// brackets, an empty title, or a target whose shape does not fit `kind`.
pub fn parse_reference(kind: SymbolKind, content: &str) -> Result<Reference> {
    parse_content(kind, content, content)
}

fn parse_kind(name: &str, token: &str) -> Result<SymbolKind> {
    SymbolKind::from_str(name)
        .map_err(|_| Error::malformed(token, format!("unknown role kind `{name}`")))
}

fn parse_content(kind: SymbolKind, content: &str, token: &str) -> Result<Reference> {
    let content = content.trim();

    let (title, target) = if content.contains(['<', '>']) {
        let caps = EXPLICIT_TITLE
            .captures(content)
            .ok_or_else(|| Error::malformed(token, "unbalanced angle brackets"))?;
        let title = caps[1].trim();
        if title.contains(['<', '>']) {
            return Err(Error::malformed(token, "unbalanced angle brackets"));
        }
        if title.is_empty() {
            return Err(Error::malformed(token, "empty title before `<target>`"));
        }
        (Some(title.to_string()), caps[2].trim().to_string())
    } else {
        (None, content.to_string())
    };

    if target.is_empty() {
        return Err(Error::malformed(token, "empty target"));
    }

    let split = Target::split(kind, &target, token)?;
    Ok(Reference {
        kind,
        raw_target: target,
        target: split,
        title,
        location: None,
    })
}

/// A role found in running text
#[derive(Debug, Clone)]
pub struct RoleMatch {
    /// Byte range of the whole token in the text
    pub span: std::ops::Range<usize>,
    pub line: usize,
    pub column: usize,
    pub reference: Result<Reference>,
}

/// Find every role of this domain in `text`.
///
/// Locations are attached to both successful references and errors.
pub fn find_roles(text: &str, file: &str) -> Vec<RoleMatch> {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect();
    let literals = literal_spans(text);

    ROLE_IN_TEXT
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if literals.iter().any(|span| span.contains(&whole.start())) {
                return None;
            }
            let line_idx = line_starts.partition_point(|&start| start <= whole.start()) - 1;
            let line_start = line_starts[line_idx];
            let column = text[line_start..whole.start()].chars().count() + 1;
            let location = SourceLocation::new(file, line_idx + 1, column);

            let token = whole.as_str();
            let reference = if caps[3].is_empty() {
                Err(Error::malformed(token, "missing closing backquote"))
            } else {
                parse_kind(&caps[1], token).and_then(|kind| parse_content(kind, &caps[2], token))
            };

            Some(RoleMatch {
                span: whole.range(),
                line: location.line,
                column: location.column,
                reference: reference
                    .map(|r| r.at(location.clone()))
                    .map_err(|e| e.at(location)),
            })
        })
        .collect()
}

/// Byte ranges where roles are shown rather than interpreted.
///
/// Covers inline literals, indented literal blocks after a paragraph ending
/// in `::` or after a code directive, and fenced code blocks.
fn literal_spans(text: &str) -> Vec<std::ops::Range<usize>> {
    let mut spans: Vec<_> = INLINE_LITERAL.find_iter(text).map(|m| m.range()).collect();

    let mut offset = 0;
    // indent of the line that introduced the current literal block
    let mut block: Option<usize> = None;
    let mut fence: Option<(&str, usize)> = None;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let content = line.trim_end();
        let trimmed = content.trim_start();
        let indent = content.len() - trimmed.len();

        if let Some((marker, fence_start)) = fence {
            if trimmed.starts_with(marker) {
                spans.push(fence_start..offset);
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            fence = Some((&trimmed[..3], start));
            block = None;
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }
        if let Some(base) = block {
            if indent > base {
                spans.push(start..offset);
                continue;
            }
            block = None;
        }

        let introduces = if trimmed.starts_with("..") {
            CODE_DIRECTIVE.is_match(trimmed)
        } else {
            trimmed.ends_with("::")
        };
        if introduces {
            block = Some(indent);
        }
    }

    if let Some((_, fence_start)) = fence {
        spans.push(fence_start..text.len());
    }
    spans
}
