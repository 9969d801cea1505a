//! Check command implementation.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::load::load_symbol_table;
use crate::resolve::Resolver;
use crate::scan::scan_documents;
use crate::ui;

/// Resolve every reference in the docs directory and report failures
pub fn check_all(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let index = match load_symbol_table(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };
    let mut diagnostics = index.warnings;

    let scan = scan_documents(config);
    diagnostics.extend(scan.diagnostics.iter().cloned());

    let resolver = Resolver::new(&index.table);
    let mut resolved = 0;
    for document in &scan.documents {
        let file = document.relative.display().to_string();
        for scanned in &document.roles {
            let outcome = scanned
                .role
                .reference
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|r| resolver.resolve(r, scanned.default_module.as_deref()));
            match outcome {
                Ok(_) => resolved += 1,
                Err(e) => diagnostics.push(Diagnostic::from_error(&e, file.as_str())),
            }
        }
    }

    ui::check_header();
    ui::check_count(index.modules.len(), "modules");
    ui::check_count(index.table.len(), "symbols");
    ui::check_count(scan.documents.len(), "documents");
    ui::check_count(scan.refs_found(), "references");
    ui::info("");

    if diagnostics.is_empty() {
        ui::success(format!("All {resolved} references resolved"));
    }

    Ok(diagnostics)
}
