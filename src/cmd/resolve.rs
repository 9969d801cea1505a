//! Resolve command implementation.

use crate::cmd::link_format;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::load::load_symbol_table;
use crate::reference::parse_role;
use crate::render::{LinkFormat, render};
use crate::resolve::Resolver;

/// Resolve a single role token and print the rendered link on stdout
pub fn resolve_one(
    config: &Config,
    token: &str,
    module: Option<&str>,
    format: Option<LinkFormat>,
) -> anyhow::Result<Vec<Diagnostic>> {
    let index = match load_symbol_table(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };
    let mut diagnostics = index.warnings;

    let default_module = module.or(config.resolve.default_module.as_deref());
    let linked = parse_role(token).and_then(|reference| {
        Resolver::new(&index.table).link(&reference, default_module, &config.render.extension)
    });

    match linked {
        Ok(link) => {
            tracing::debug!(symbol = %link.symbol, "resolved");
            println!("{}", render(&link, link_format(config, format, None)));
        }
        Err(e) => diagnostics.push(Diagnostic::from_error(&e, "<command line>")),
    }

    Ok(diagnostics)
}
