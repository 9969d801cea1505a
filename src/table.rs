//! Symbol table: built once per build, then sealed for lookups.
//!
//! [`SymbolTableBuilder`] accepts registrations. [`SymbolTableBuilder::seal`]
//! consumes it and returns a read-only [`SymbolTable`] that can be shared
//! between threads.

use crate::error::{Error, Result};
use crate::kind::SymbolKind;
use crate::symbol::{QualifiedName, Symbol};
use std::collections::HashMap;

/// Index of a symbol inside its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

type SymbolKey = (SymbolKind, QualifiedName);

/// Symbol table in the "building" state
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    symbols: Vec<Symbol>,
    by_name: HashMap<SymbolKey, SymbolId>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol.
    ///
    /// Member symbols require their owner to be registered first.
    ///
    /// # Errors
    /// - [`Error::DuplicateSymbol`] if (kind, qualified name) is already present
    /// - [`Error::UnknownSymbol`] if a member's owner is missing
    pub fn register(&mut self, symbol: Symbol) -> Result<SymbolId> {
        let key = (symbol.kind, symbol.qualified_name.clone());
        if self.by_name.contains_key(&key) {
            return Err(Error::DuplicateSymbol {
                kind: symbol.kind,
                name: symbol.qualified_name.to_string(),
            });
        }

        if let Some((owner_kind, owner_name)) = symbol.owner() {
            if !self.by_name.contains_key(&(owner_kind, owner_name.clone())) {
                return Err(Error::UnknownSymbol {
                    kind: owner_kind,
                    name: owner_name.to_string(),
                });
            }
        }

        let id = SymbolId(self.symbols.len());
        tracing::trace!(symbol = %symbol, "registered");
        self.symbols.push(symbol);
        self.by_name.insert(key, id);
        Ok(id)
    }

    /// Register every symbol in order, stopping at the first error
    pub fn register_all(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> Result<()> {
        for symbol in symbols {
            self.register(symbol)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Stop accepting registrations and build the lookup indexes
    pub fn seal(self) -> SymbolTable {
        let mut by_short_name: HashMap<(SymbolKind, String), Vec<SymbolId>> = HashMap::new();
        for (i, symbol) in self.symbols.iter().enumerate() {
            by_short_name
                .entry((symbol.kind, symbol.short_name()))
                .or_default()
                .push(SymbolId(i));
        }
        tracing::debug!(symbols = self.symbols.len(), "symbol table sealed");
        SymbolTable {
            symbols: self.symbols,
            by_name: self.by_name,
            by_short_name,
        }
    }
}

/// Symbol table in the "sealed" state: read-only, lookups only
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<SymbolKey, SymbolId>,
    /// (kind, name without module) -> symbols, in registration order
    by_short_name: HashMap<(SymbolKind, String), Vec<SymbolId>>,
}

impl SymbolTable {
    /// Look up a symbol by kind and fully-qualified name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownSymbol`] if nothing is registered under that key.
    pub fn lookup(&self, kind: SymbolKind, qualified_name: &QualifiedName) -> Result<&Symbol> {
        self.get(kind, qualified_name)
            .ok_or_else(|| Error::UnknownSymbol {
                kind,
                name: qualified_name.to_string(),
            })
    }

    /// Look up a symbol, returning `None` on a miss
    pub fn get(&self, kind: SymbolKind, qualified_name: &QualifiedName) -> Option<&Symbol> {
        self.by_name
            .get(&(kind, qualified_name.clone()))
            .map(|id| &self.symbols[id.0])
    }

    /// All symbols of `kind` whose module-less name is `short_name`, across modules
    pub fn by_short_name(&self, kind: SymbolKind, short_name: &str) -> Vec<&Symbol> {
        self.by_short_name
            .get(&(kind, short_name.to_string()))
            .map(|ids| ids.iter().map(|id| &self.symbols[id.0]).collect())
            .unwrap_or_default()
    }

    /// Symbols in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Names of all modules that define at least one symbol, sorted
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.symbols.iter().map(Symbol::defining_module).collect();
        modules.sort_unstable();
        modules.dedup();
        modules
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(kind: SymbolKind, name: &str) -> Symbol {
        Symbol::new(kind, name).unwrap()
    }

    fn qn(name: &str) -> QualifiedName {
        QualifiedName::parse(name).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut builder = SymbolTableBuilder::new();
        builder.register(sym(SymbolKind::Module, "Example")).unwrap();
        builder.register(sym(SymbolKind::Enum, "Example.Operation")).unwrap();
        builder
            .register(sym(SymbolKind::EnumField, "Example.Operation.ADD"))
            .unwrap();
        let table = builder.seal();

        assert_eq!(table.len(), 3);
        let found = table
            .lookup(SymbolKind::EnumField, &qn("Example.Operation.ADD"))
            .unwrap();
        assert_eq!(found.short_name(), "Operation.ADD");
    }

    #[test]
    fn test_duplicate_registration() {
        let mut builder = SymbolTableBuilder::new();
        builder.register(sym(SymbolKind::Struct, "Example.Work")).unwrap();
        let err = builder
            .register(sym(SymbolKind::Struct, "Example.Work"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateSymbol {
                kind: SymbolKind::Struct,
                name: "Example.Work".to_string()
            }
        );
    }

    #[test]
    fn test_same_name_different_kind_is_allowed() {
        let mut builder = SymbolTableBuilder::new();
        builder.register(sym(SymbolKind::Module, "shared")).unwrap();
        builder.register(sym(SymbolKind::Struct, "shared.shared")).unwrap();
        builder.register(sym(SymbolKind::Service, "shared.shared")).unwrap();
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_member_requires_owner() {
        let mut builder = SymbolTableBuilder::new();
        let err = builder
            .register(sym(SymbolKind::ServiceMethod, "Example.Calculator.ping"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownSymbol {
                kind: SymbolKind::Service,
                name: "Example.Calculator".to_string()
            }
        );

        // A struct of the same name does not own exception fields
        builder.register(sym(SymbolKind::Struct, "Example.Oops")).unwrap();
        assert!(
            builder
                .register(sym(SymbolKind::ExceptionField, "Example.Oops.why"))
                .is_err()
        );
    }

    #[test]
    fn test_lookup_miss() {
        let table = SymbolTableBuilder::new().seal();
        let err = table.lookup(SymbolKind::Typedef, &qn("Example.MyInteger")).unwrap_err();
        assert_eq!(err.to_string(), "unknown typedef `Example.MyInteger`");
    }

    #[test]
    fn test_short_name_index_spans_modules() {
        let mut builder = SymbolTableBuilder::new();
        builder
            .register_all([
                sym(SymbolKind::Struct, "shared.SharedStruct"),
                sym(SymbolKind::Struct, "tutorial.SharedStruct"),
                sym(SymbolKind::Struct, "tutorial.Work"),
            ])
            .unwrap();
        let table = builder.seal();

        let hits = table.by_short_name(SymbolKind::Struct, "SharedStruct");
        assert_eq!(hits.len(), 2);
        assert!(table.by_short_name(SymbolKind::Enum, "Work").is_empty());
        assert_eq!(table.modules(), vec!["shared", "tutorial"]);
    }

    #[test]
    fn test_sealed_table_is_shareable() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<SymbolTable>();
    }
}
