//! Loading IDL modules and building the symbol table.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::error::Error;
use crate::idl::IdlModule;
use crate::table::{SymbolTable, SymbolTableBuilder};
use std::path::{Path, PathBuf};

/// Load error types
#[derive(Debug)]
pub enum LoadError {
    Io { file: String, message: String },
    Json { file: String, message: String },
    Symbol { file: String, error: Error },
}

impl From<LoadError> for Diagnostic {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Io { file, message } => {
                Diagnostic::new(DiagnosticCode::E0901IoError, message, file)
            }
            LoadError::Json { file, message } => Diagnostic::new(
                DiagnosticCode::E0401IdlSchemaInvalid,
                format!("Invalid IDL JSON: {message}"),
                file,
            ),
            LoadError::Symbol { file, error } => Diagnostic::from_error(&error, file),
        }
    }
}

/// Loaded IDL: the modules and the sealed table built from them
#[derive(Debug)]
pub struct SymbolIndex {
    pub modules: Vec<IdlModule>,
    pub table: SymbolTable,
    pub warnings: Vec<Diagnostic>,
}

/// List the `*.json` files of the IDL directory, sorted by file name
fn idl_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::Io {
        file: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::Io {
            file: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load a single module from `thrift --gen json` output
pub fn load_module(path: &Path) -> Result<IdlModule, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| LoadError::Json {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load every IDL module and register its symbols.
///
/// All files are read before failing so that every broken file is reported.
pub fn load_symbol_table(config: &Config) -> Result<SymbolIndex, Vec<Diagnostic>> {
    let idl_dir = config.idl_dir();
    if !idl_dir.exists() {
        return Err(vec![Diagnostic::new(
            DiagnosticCode::E0502PathNotFound,
            "IDL directory not found",
            idl_dir.display().to_string(),
        )]);
    }

    let files = idl_files(&idl_dir).map_err(|e| vec![e.into()])?;
    let mut errors: Vec<Diagnostic> = Vec::new();
    let mut modules = Vec::new();
    let mut builder = SymbolTableBuilder::new();

    for path in &files {
        let module = match load_module(path) {
            Ok(m) => m,
            Err(e) => {
                errors.push(e.into());
                continue;
            }
        };

        let registered = module
            .symbols()
            .and_then(|symbols| builder.register_all(symbols));
        if let Err(error) = registered {
            errors.push(
                LoadError::Symbol {
                    file: path.display().to_string(),
                    error,
                }
                .into(),
            );
            continue;
        }
        tracing::debug!(module = %module.name, file = %path.display(), "loaded IDL module");
        modules.push(module);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut warnings = Vec::new();
    if modules.is_empty() {
        warnings.push(Diagnostic::new(
            DiagnosticCode::W0102NoIdlModules,
            "No IDL modules found (expected `thrift --gen json` output)",
            idl_dir.display().to_string(),
        ));
    }

    Ok(SymbolIndex {
        modules,
        table: builder.seal(),
        warnings,
    })
}
