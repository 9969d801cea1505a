//! Link rendering and inline role expansion.
//!
//! A resolved reference becomes a link whose text is the explicit title (or
//! the target as written) and whose destination is the anchor of the symbol
//! on its module's page:
//!
//! - markdown: `[Operation.ADD](tutorial.html#tutorial.Operation.ADD:enum_field)`
//! - rst: `` `Operation.ADD <tutorial.html#tutorial.Operation.ADD:enum_field>`__ ``
//! - html: `<a class="reference internal" href="..." title="...">Operation.ADD</a>`

use crate::error::Error;
use crate::resolve::Resolver;
use crate::scan::ScannedRole;
use crate::symbol::Symbol;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::AsRefStr;

/// Output syntax for rendered links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinkFormat {
    #[default]
    Markdown,
    Rst,
    Html,
}

impl LinkFormat {
    /// Link syntax native to a document, by file extension
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("rst" | "rest") => LinkFormat::Rst,
            Some("html" | "htm") => LinkFormat::Html,
            _ => LinkFormat::Markdown,
        }
    }
}

/// Where a link points: the defining module's page and the symbol's anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub document: String,
    pub anchor: String,
}

impl Destination {
    pub fn for_symbol(symbol: &Symbol, extension: &str) -> Self {
        Self {
            document: format!("{}{}", symbol.defining_module(), extension),
            anchor: symbol.anchor(),
        }
    }

    pub fn href(&self) -> String {
        format!("{}#{}", self.document, self.anchor)
    }
}

/// A reference matched to its symbol, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink<'a> {
    pub symbol: &'a Symbol,
    pub display_text: String,
    pub destination: Destination,
}

/// Render a link in the requested format
pub fn render(link: &ResolvedLink, format: LinkFormat) -> String {
    match format {
        LinkFormat::Markdown => format!(
            "[{}]({})",
            escape_markdown(&link.display_text),
            link.destination.href()
        ),
        LinkFormat::Rst => format!(
            "`{} <{}>`__",
            escape_rst(&link.display_text),
            link.destination.href()
        ),
        LinkFormat::Html => format!(
            "<a class=\"reference internal\" href=\"{}\" title=\"{}\">{}</a>",
            escape_html(&link.destination.href()),
            escape_html(&link.symbol.qualified_name.to_string()),
            escape_html(&link.display_text)
        ),
    }
}

fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape title text of an anonymous reST hyperlink
fn escape_rst(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '<') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Link settings for one document
#[derive(Debug, Clone)]
pub struct LinkStyle {
    pub format: LinkFormat,
    /// Suffix of module pages, e.g. `.html`
    pub extension: String,
}

/// Result of expanding the roles of one document
#[derive(Debug, Default)]
pub struct Expansion {
    pub text: String,
    pub links: usize,
    /// Roles that failed to parse or resolve; they are left as written
    pub errors: Vec<Error>,
}

impl Expansion {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Replace every role of a scanned document with its rendered link.
///
/// `roles` must be the roles found in `text`, in order of appearance.
pub fn expand_roles(
    text: &str,
    roles: &[ScannedRole],
    resolver: &Resolver,
    style: &LinkStyle,
) -> Expansion {
    let mut expansion = Expansion {
        text: String::with_capacity(text.len()),
        ..Expansion::default()
    };
    let mut cursor = 0;

    for scanned in roles {
        let span = &scanned.role.span;
        expansion.text.push_str(&text[cursor..span.start]);
        cursor = span.end;

        let linked = scanned.role.reference.clone().and_then(|reference| {
            resolver.link(
                &reference,
                scanned.default_module.as_deref(),
                &style.extension,
            )
        });
        match linked {
            Ok(link) => {
                expansion.text.push_str(&render(&link, style.format));
                expansion.links += 1;
            }
            Err(e) => {
                expansion.text.push_str(&text[span.clone()]);
                expansion.errors.push(e);
            }
        }
    }

    expansion.text.push_str(&text[cursor..]);
    expansion
}
