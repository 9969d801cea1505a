//! Command implementations.

pub mod check;
pub mod index;
pub mod init;
pub mod pages;
pub mod render;
pub mod resolve;

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::render::LinkFormat;
use std::path::Path;

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// Plain text, tab separated
    Plain,
    /// JSON
    Json,
}

/// `--format` override, then the configured format, then the document's own syntax
pub(crate) fn link_format(
    config: &Config,
    format: Option<LinkFormat>,
    document: Option<&Path>,
) -> LinkFormat {
    format
        .or(config.render.format)
        .or_else(|| document.map(LinkFormat::for_path))
        .unwrap_or_default()
}

/// Split diagnostics into (errors, warnings) counts
pub(crate) fn count_levels(diags: &[Diagnostic]) -> (usize, usize) {
    use crate::diagnostic::DiagnosticLevel;
    diags.iter().fold((0, 0), |(e, w), d| match d.level {
        DiagnosticLevel::Error => (e + 1, w),
        DiagnosticLevel::Warning => (e, w + 1),
    })
}
