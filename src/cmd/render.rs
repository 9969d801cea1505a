//! Render command implementation.

use crate::cmd::{count_levels, link_format};
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::load::load_symbol_table;
use crate::render::{LinkFormat, LinkStyle, expand_roles};
use crate::resolve::Resolver;
use crate::scan::scan_documents;
use crate::ui;
use anyhow::Context;

/// Write every scanned document to the output directory with roles linked.
///
/// A document with any unresolved or malformed reference is not written.
pub fn render(
    config: &Config,
    dry_run: bool,
    format: Option<LinkFormat>,
) -> anyhow::Result<Vec<Diagnostic>> {
    let index = match load_symbol_table(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };
    let mut diagnostics = index.warnings;

    let scan = scan_documents(config);
    if count_levels(&scan.diagnostics).0 > 0 {
        diagnostics.extend(scan.diagnostics);
        return Ok(diagnostics);
    }
    diagnostics.extend(scan.diagnostics);

    let resolver = Resolver::new(&index.table);
    let output_dir = config.output_dir();
    let mut written = 0;

    for document in &scan.documents {
        let file = document.relative.display().to_string();
        let style = LinkStyle {
            format: link_format(config, format, Some(document.relative.as_path())),
            extension: config.render.extension.clone(),
        };
        let expansion = expand_roles(&document.text, &document.roles, &resolver, &style);

        if !expansion.is_clean() {
            diagnostics.extend(
                expansion
                    .errors
                    .iter()
                    .map(|e| Diagnostic::from_error(e, file.as_str())),
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::W0101DocumentSkipped,
                format!(
                    "Not rendered: {} unresolved reference(s)",
                    expansion.errors.len()
                ),
                file,
            ));
            continue;
        }

        let out_path = output_dir.join(&document.relative);
        if dry_run {
            ui::would_write(&out_path, expansion.links, "links");
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&out_path, &expansion.text)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        ui::rendered(&out_path);
        written += 1;
    }

    if !dry_run {
        ui::render_summary(written, "document");
    }

    Ok(diagnostics)
}
