//! Reference resolution against a sealed symbol table.
//!
//! A target is resolved in order:
//!
//! 1. as written, if it has enough components to be fully qualified for its kind
//! 2. inside the default module, if one is active
//! 3. by its module-less name across all modules, if exactly one symbol matches
//!
//! More than one match in step 3 is an error; the resolver never picks one.
//!
//! Step 3 means a bare target can resolve even when neither the qualified
//! form nor the default-module form exists: `VERSION` with default module
//! `tutorial` finds `shared.VERSION` if no other module defines it. A bare
//! reference therefore equals its default-module qualified form only when the
//! default module defines the name.

use crate::error::{Error, Result};
use crate::reference::Reference;
use crate::render::{Destination, ResolvedLink};
use crate::symbol::Symbol;
use crate::table::SymbolTable;

/// Resolves references against one table; cheap to copy
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a SymbolTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a SymbolTable {
        self.table
    }

    /// Find the unique symbol a reference points to.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedReference`] when no symbol matches or when a
    /// bare target matches symbols in more than one module. The error carries
    /// the reference's location.
    pub fn resolve(&self, reference: &Reference, default_module: Option<&str>) -> Result<&'a Symbol> {
        let kind = reference.kind;
        let target = &reference.target;
        let mut tried = Vec::new();

        if target.is_qualified(kind) {
            let name = target.as_qualified();
            if let Some(symbol) = self.table.get(kind, &name) {
                tracing::trace!(%name, "resolved fully-qualified reference");
                return Ok(symbol);
            }
            tried.push(name.to_string());
            return Err(self.unresolved(reference, tried, vec![]));
        }

        if let Some(module) = default_module {
            let name = target.within(module);
            if let Some(symbol) = self.table.get(kind, &name) {
                tracing::trace!(%name, "resolved in default module");
                return Ok(symbol);
            }
            tried.push(name.to_string());
        }

        let matches = self.table.by_short_name(kind, &target.to_string());
        match matches.as_slice() {
            [symbol] => {
                tracing::debug!(
                    reference = %target,
                    resolved = %symbol.qualified_name,
                    "resolved bare reference outside the default module"
                );
                Ok(*symbol)
            }
            [] => Err(self.unresolved(reference, tried, vec![])),
            many => {
                let mut candidates: Vec<String> = many
                    .iter()
                    .map(|s| s.qualified_name.to_string())
                    .collect();
                candidates.sort();
                tracing::debug!(reference = %target, ?candidates, "ambiguous reference");
                Err(self.unresolved(reference, tried, candidates))
            }
        }
    }

    /// Resolve and build the link for a reference
    pub fn link(
        &self,
        reference: &Reference,
        default_module: Option<&str>,
        extension: &str,
    ) -> Result<ResolvedLink<'a>> {
        let symbol = self.resolve(reference, default_module)?;
        Ok(ResolvedLink {
            symbol,
            display_text: reference.display_text().to_string(),
            destination: Destination::for_symbol(symbol, extension),
        })
    }

    fn unresolved(&self, reference: &Reference, tried: Vec<String>, candidates: Vec<String>) -> Error {
        Error::UnresolvedReference {
            kind: reference.kind,
            target: reference.raw_target.clone(),
            tried,
            candidates,
            location: reference.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::SymbolKind;
    use crate::reference::{SourceLocation, parse_reference};
    use crate::table::SymbolTableBuilder;

    fn table(symbols: &[(SymbolKind, &str)]) -> SymbolTable {
        let mut builder = SymbolTableBuilder::new();
        for (kind, name) in symbols {
            builder.register(Symbol::new(*kind, name).unwrap()).unwrap();
        }
        builder.seal()
    }

    fn tutorial() -> SymbolTable {
        table(&[
            (SymbolKind::Module, "shared"),
            (SymbolKind::Struct, "shared.SharedStruct"),
            (SymbolKind::Module, "tutorial"),
            (SymbolKind::Struct, "tutorial.Work"),
            (SymbolKind::StructField, "tutorial.Work.num1"),
            (SymbolKind::Service, "tutorial.Calculator"),
            (SymbolKind::ServiceMethod, "tutorial.Calculator.ping"),
            (SymbolKind::Struct, "other.Work"),
        ])
    }

    #[test]
    fn test_fully_qualified_ignores_default_module() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::StructField, "tutorial.Work.num1").unwrap();
        let sym = resolver.resolve(&r, Some("shared")).unwrap();
        assert_eq!(sym.qualified_name.to_string(), "tutorial.Work.num1");
    }

    #[test]
    fn test_fully_qualified_miss_reports_name() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::Struct, "shared.Work").unwrap();
        match resolver.resolve(&r, None).unwrap_err() {
            Error::UnresolvedReference { tried, candidates, .. } => {
                assert_eq!(tried, vec!["shared.Work".to_string()]);
                assert!(candidates.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_default_module_wins_over_other_modules() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::Struct, "Work").unwrap();
        let sym = resolver.resolve(&r, Some("tutorial")).unwrap();
        assert_eq!(sym.qualified_name.to_string(), "tutorial.Work");
    }

    #[test]
    fn test_unique_bare_name_resolves_across_modules() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::Struct, "SharedStruct").unwrap();
        let sym = resolver.resolve(&r, Some("tutorial")).unwrap();
        assert_eq!(sym.qualified_name.to_string(), "shared.SharedStruct");
    }

    #[test]
    fn test_ambiguous_bare_name_is_rejected() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let loc = SourceLocation::new("api.rst", 4, 2);
        let r = parse_reference(SymbolKind::Struct, "Work").unwrap().at(loc.clone());
        let err = resolver.resolve(&r, Some("shared")).unwrap_err();
        assert!(err.is_ambiguous());
        assert_eq!(err.location(), Some(&loc));
        match err {
            Error::UnresolvedReference { tried, candidates, .. } => {
                assert_eq!(tried, vec!["shared.Work".to_string()]);
                assert_eq!(candidates, vec!["other.Work".to_string(), "tutorial.Work".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_kind_must_match() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::Service, "Work").unwrap();
        assert!(resolver.resolve(&r, Some("tutorial")).is_err());
    }

    #[test]
    fn test_module_reference() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::Module, "shared").unwrap();
        let sym = resolver.resolve(&r, Some("tutorial")).unwrap();
        assert_eq!(sym.kind, SymbolKind::Module);
    }

    #[test]
    fn test_link_uses_title_and_anchor() {
        let table = tutorial();
        let resolver = Resolver::new(&table);
        let r = parse_reference(SymbolKind::ServiceMethod, "Ping it <Calculator.ping>").unwrap();
        let link = resolver.link(&r, Some("tutorial"), ".html").unwrap();
        assert_eq!(link.display_text, "Ping it");
        assert_eq!(link.destination.document, "tutorial.html");
        assert_eq!(link.destination.anchor, "tutorial.Calculator.ping:service_method");
    }
}
