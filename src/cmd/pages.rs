//! Pages command implementation.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::load::load_symbol_table;
use crate::page::{PageFormat, module_page};
use crate::ui;
use anyhow::Context;
use std::path::PathBuf;

/// Page file of a module: `<module><extension>`, or `<module>/index.html`
/// when the extension is a directory suffix such as `/`
fn page_path(config: &Config, module: &str) -> PathBuf {
    let extension = &config.render.extension;
    if extension.ends_with('/') {
        config.output_dir().join(module).join("index.html")
    } else {
        config.output_dir().join(format!("{module}{extension}"))
    }
}

/// Write one reference page per IDL module, the targets of rendered links
pub fn write_pages(config: &Config, dry_run: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let index = match load_symbol_table(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };
    let format = PageFormat::for_extension(&config.render.extension);
    let mut written = 0;

    for module in &index.modules {
        let path = page_path(config, &module.name);
        let page = module_page(module, format);
        tracing::debug!(module = %module.name, ?format, "generated page");

        if dry_run {
            let anchors = index
                .table
                .iter()
                .filter(|s| s.defining_module() == module.name)
                .count();
            ui::would_write(&path, anchors, "symbols");
            continue;
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, page)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        ui::rendered(&path);
        written += 1;
    }

    if !dry_run {
        ui::render_summary(written, "page");
    }

    Ok(index.warnings)
}
