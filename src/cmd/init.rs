//! Init command implementation.

use crate::config::{CONFIG_FILE, Config};
use crate::diagnostic::Diagnostic;
use crate::ui;
use anyhow::Context;

/// Write a default `thriftdoc.toml` and create the IDL and docs directories
pub fn init_project(config: &Config, force: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let config_path = config.root.join(CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use -f to overwrite)",
            config_path.display()
        );
    }

    let defaults = Config {
        root: config.root.clone(),
        ..Config::default()
    };
    for dir in [defaults.idl_dir(), defaults.docs_dir()] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        ui::created("directory", &dir);
    }

    std::fs::write(&config_path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    ui::created("config", &config_path);

    ui::success("Project initialized");
    Ok(vec![])
}
