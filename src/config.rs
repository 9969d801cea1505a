//! Configuration loading and management.

use crate::render::LinkFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name, looked up from the working directory upwards
pub const CONFIG_FILE: &str = "thriftdoc.toml";

/// Project configuration (thriftdoc.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub resolve: ResolveConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub render: RenderConfig,
    /// Directory the relative paths are resolved against (the config file's directory)
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
}

fn default_project_name() -> String {
    "thrift-docs".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `thrift --gen json` output
    #[serde(default = "default_idl_dir")]
    pub idl_dir: PathBuf,
    /// Documentation sources containing `:thrift:` roles
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    /// Output directory for rendered documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_idl_dir() -> PathBuf {
    PathBuf::from("idl")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            idl_dir: default_idl_dir(),
            docs_dir: default_docs_dir(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Module used for unqualified targets when no `thrift:module` directive is active
    #[serde(default)]
    pub default_module: Option<String>,
}

/// Documentation scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Glob patterns (relative to docs_dir) for files to scan
    #[serde(default = "default_scan_include")]
    pub include: Vec<String>,
    /// Glob patterns for files to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_scan_include() -> Vec<String> {
    vec!["**/*.rst".to_string(), "**/*.md".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: default_scan_include(),
            exclude: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Link syntax for every document; unset picks it from each document's extension
    #[serde(default)]
    pub format: Option<LinkFormat>,
    /// Suffix appended to a module name to form its page, e.g. `.html`
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    ".html".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: None,
            extension: default_extension(),
        }
    }
}

impl Config {
    /// Load config from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(Self::find_config)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config: {}", config_path.display()))?
        } else {
            Config::default()
        };

        config.root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!(config = %config_path.display(), root = %config.root.display(), "loaded config");
        Ok(config)
    }

    /// Parse config text; paths stay relative to the working directory
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.root = PathBuf::from(".");
        Ok(config)
    }

    /// Find config file by walking up directory tree
    fn find_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn idl_dir(&self) -> PathBuf {
        self.root.join(&self.paths.idl_dir)
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(&self.paths.docs_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.paths.output_dir)
    }

    /// Generate default config TOML
    pub fn default_toml() -> &'static str {
        r#"[project]
name = "my-thrift-docs"

[paths]
# Output of `thrift --gen json` for every documented .thrift file
idl_dir = "idl"
docs_dir = "docs"
output_dir = "build"

[resolve]
# Module for unqualified targets until a `.. thrift:module::` directive
# default_module = "tutorial"

[scan]
include = ["**/*.rst", "**/*.md"]
exclude = []

[render]
# markdown, rst or html; by default each document gets its own syntax
# format = "rst"
extension = ".html"
"#
    }
}
