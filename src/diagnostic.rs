//! Diagnostic codes and error reporting.

use crate::error::Error;
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// Diagnostic error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    // Reference syntax errors (E01xx)
    E0101MalformedReference,

    // Resolution errors (E02xx)
    E0201UnresolvedReference,
    E0202AmbiguousReference,

    // Symbol table errors (E03xx)
    E0301UnknownSymbol,
    E0302DuplicateSymbol,
    E0303InvalidSymbolName,

    // IDL errors (E04xx)
    E0401IdlSchemaInvalid,

    // Config errors (E05xx)
    E0501ConfigInvalid,
    E0502PathNotFound,

    // General errors (E09xx)
    E0901IoError,

    // Warnings (W01xx)
    W0101DocumentSkipped,
    W0102NoIdlModules,
}

impl DiagnosticCode {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Self::W0101DocumentSkipped | Self::W0102NoIdlModules => DiagnosticLevel::Warning,
            _ => DiagnosticLevel::Error,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            // E01xx - Reference syntax
            Self::E0101MalformedReference => "E0101",
            // E02xx - Resolution
            Self::E0201UnresolvedReference => "E0201",
            Self::E0202AmbiguousReference => "E0202",
            // E03xx - Symbol table
            Self::E0301UnknownSymbol => "E0301",
            Self::E0302DuplicateSymbol => "E0302",
            Self::E0303InvalidSymbolName => "E0303",
            // E04xx - IDL
            Self::E0401IdlSchemaInvalid => "E0401",
            // E05xx - Config
            Self::E0501ConfigInvalid => "E0501",
            Self::E0502PathNotFound => "E0502",
            // E09xx - General
            Self::E0901IoError => "E0901",
            // W01xx - Warnings
            Self::W0101DocumentSkipped => "W0101",
            Self::W0102NoIdlModules => "W0102",
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    /// File, or `file:line:col` for reference errors
    pub file: String,
    pub level: DiagnosticLevel,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            level: code.level(),
            code,
            message: message.into(),
            file: file.into(),
        }
    }

    /// Convert a cross-reference error, using `file` when the error has no location
    pub fn from_error(err: &Error, file: impl Into<String>) -> Self {
        let code = match err {
            Error::MalformedReference { .. } => DiagnosticCode::E0101MalformedReference,
            Error::UnresolvedReference { .. } if err.is_ambiguous() => {
                DiagnosticCode::E0202AmbiguousReference
            }
            Error::UnresolvedReference { .. } => DiagnosticCode::E0201UnresolvedReference,
            Error::UnknownSymbol { .. } => DiagnosticCode::E0301UnknownSymbol,
            Error::DuplicateSymbol { .. } => DiagnosticCode::E0302DuplicateSymbol,
            Error::InvalidSymbolName { .. } => DiagnosticCode::E0303InvalidSymbolName,
        };
        let file = match err.location() {
            Some(loc) => loc.to_string(),
            None => file.into(),
        };
        Self::new(code, err.to_string(), file)
    }
}

impl From<Error> for Diagnostic {
    fn from(err: Error) -> Self {
        Self::from_error(&err, "<input>")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
        };
        write!(
            f,
            "{}[{}]: {} ({})",
            level_str,
            self.code.code(),
            self.message,
            self.file
        )
    }
}

impl std::error::Error for Diagnostic {}
