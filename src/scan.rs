//! Documentation scanning.
//!
//! Walks the docs directory, picks files matching the include/exclude glob
//! patterns and finds every `:thrift:` role in them. Each role is paired with
//! the default module active at its position: the configured default until
//! the first `.. thrift:module:: Name` directive, then the latest directive.

use crate::config::{CONFIG_FILE, Config};
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::reference::{RoleMatch, find_roles};
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use walkdir::WalkDir;

static MODULE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\.\.[ \t]+thrift:module::[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]*\r?$")
        .unwrap_or_else(|_| unreachable!("literal pattern"))
});

/// A role together with the module its bare targets resolve in
#[derive(Debug, Clone)]
pub struct ScannedRole {
    pub role: RoleMatch,
    pub default_module: Option<String>,
}

/// A documentation file and the roles found in it
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    pub path: PathBuf,
    /// Path relative to the docs directory, used in diagnostics and output
    pub relative: PathBuf,
    pub text: String,
    pub roles: Vec<ScannedRole>,
}

/// Result of scanning the docs directory
#[derive(Debug, Default)]
pub struct ScanResult {
    pub documents: Vec<ScannedDocument>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanResult {
    pub fn refs_found(&self) -> usize {
        self.documents.iter().map(|d| d.roles.len()).sum()
    }
}

/// Find roles in `text` and attach the active default module to each
pub fn scan_text(text: &str, file: &str, default_module: Option<&str>) -> Vec<ScannedRole> {
    let directives: Vec<(usize, &str)> = MODULE_DIRECTIVE
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str())))
        .collect();

    find_roles(text, file)
        .into_iter()
        .map(|role| {
            let module = directives
                .iter()
                .take_while(|(start, _)| *start < role.span.start)
                .last()
                .map(|(_, name)| *name)
                .or(default_module);
            ScannedRole {
                default_module: module.map(str::to_string),
                role,
            }
        })
        .collect()
}

fn build_globset(patterns: &[String], what: &str) -> Result<GlobSet, Diagnostic> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|e| {
            Diagnostic::new(
                DiagnosticCode::E0501ConfigInvalid,
                format!("Invalid scan.{what} glob '{pat}': {e}"),
                CONFIG_FILE,
            )
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0501ConfigInvalid,
            format!("Failed to build {what} glob set: {e}"),
            CONFIG_FILE,
        )
    })
}

/// Scan every matching file under the docs directory, sorted by path
pub fn scan_documents(config: &Config) -> ScanResult {
    let mut result = ScanResult::default();
    let docs_dir = config.docs_dir();

    if !docs_dir.exists() {
        result.diagnostics.push(Diagnostic::new(
            DiagnosticCode::E0502PathNotFound,
            "Docs directory not found",
            docs_dir.display().to_string(),
        ));
        return result;
    }

    let (include, exclude) = match (
        build_globset(&config.scan.include, "include"),
        build_globset(&config.scan.exclude, "exclude"),
    ) {
        (Ok(i), Ok(e)) => (i, e),
        (Err(d), _) | (_, Err(d)) => {
            result.diagnostics.push(d);
            return result;
        }
    };

    let mut files: Vec<PathBuf> = WalkDir::new(&docs_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();

    let default_module = config.resolve.default_module.as_deref();
    for path in files {
        let relative = path.strip_prefix(&docs_dir).unwrap_or(&path).to_path_buf();
        if !include.is_match(&relative) || exclude.is_match(&relative) {
            continue;
        }

        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::W0101DocumentSkipped,
                    format!("Skipped document (read error): {e}"),
                    path.display().to_string(),
                ));
                continue;
            }
        };

        let file = relative.display().to_string();
        let roles = scan_text(&text, &file, default_module);
        tracing::debug!(%file, roles = roles.len(), "scanned document");
        result.documents.push(ScannedDocument {
            path,
            relative,
            text,
            roles,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_module_before_directive() {
        let text = "Intro :thrift:struct:`Work`\n\n.. thrift:module:: shared\n\n:thrift:struct:`SharedStruct`\n";
        let roles = scan_text(text, "index.rst", Some("tutorial"));
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].default_module.as_deref(), Some("tutorial"));
        assert_eq!(roles[1].default_module.as_deref(), Some("shared"));
    }

    #[test]
    fn test_latest_directive_wins() {
        let text = ".. thrift:module:: a\n:thrift:enum:`E`\n   .. thrift:module:: b\n:thrift:enum:`F`\n";
        let roles = scan_text(text, "x.rst", None);
        assert_eq!(roles[0].default_module.as_deref(), Some("a"));
        assert_eq!(roles[1].default_module.as_deref(), Some("b"));
    }

    #[test]
    fn test_no_module_anywhere() {
        let roles = scan_text(":thrift:enum:`E`", "x.rst", None);
        assert_eq!(roles[0].default_module, None);
    }

    #[test]
    fn test_directive_must_be_whole_line() {
        let text = "text .. thrift:module:: a\n:thrift:enum:`E`\n";
        let roles = scan_text(text, "x.rst", Some("z"));
        assert_eq!(roles[0].default_module.as_deref(), Some("z"));
    }

    #[test]
    fn test_directive_with_crlf_line_endings() {
        let text = ".. thrift:module:: shared\r\n\r\n:thrift:struct:`SharedStruct`\r\n";
        let roles = scan_text(text, "x.rst", Some("tutorial"));
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].default_module.as_deref(), Some("shared"));
    }

    #[test]
    fn test_scan_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("guide")).unwrap();
        fs::write(docs.join("index.rst"), ":thrift:struct:`Work`\n").unwrap();
        fs::write(
            docs.join("guide/shared.rst"),
            ".. thrift:module:: shared\r\n:thrift:struct:`SharedStruct`\r\n",
        )
        .unwrap();
        fs::write(docs.join("notes.txt"), ":thrift:struct:`Ignored`\n").unwrap();
        fs::write(docs.join("draft.rst"), ":thrift:struct:`Draft`\n").unwrap();

        let mut config = Config::from_toml("[scan]\nexclude = [\"draft.rst\"]\n").unwrap();
        config.root = dir.path().to_path_buf();
        config.resolve.default_module = Some("tutorial".to_string());

        let result = scan_documents(&config);
        assert!(result.diagnostics.is_empty());
        let names: Vec<_> = result
            .documents
            .iter()
            .map(|d| d.relative.display().to_string())
            .collect();
        assert_eq!(names, vec!["guide/shared.rst", "index.rst"]);
        assert_eq!(result.refs_found(), 2);
        assert_eq!(
            result.documents[0].roles[0].default_module.as_deref(),
            Some("shared")
        );
        assert_eq!(
            result.documents[1].roles[0].default_module.as_deref(),
            Some("tutorial")
        );
    }

    #[test]
    fn test_scan_documents_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.root = dir.path().to_path_buf();
        let result = scan_documents(&config);
        assert!(result.documents.is_empty());
        assert_eq!(result.diagnostics[0].code, DiagnosticCode::E0502PathNotFound);
    }

    #[test]
    fn test_literal_examples_are_not_scanned() {
        let text = "Write ``:thrift:struct:`Foo` `` to link a struct.\n";
        assert!(scan_text(text, "x.rst", Some("tutorial")).is_empty());
    }
}
