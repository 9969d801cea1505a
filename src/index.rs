//! Alphabetical symbol index.

use crate::kind::SymbolKind;
use crate::render::Destination;
use crate::table::SymbolTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// One line of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Name without the module prefix (the module name for modules)
    pub name: String,
    pub kind: SymbolKind,
    pub qualified_name: String,
    pub destination: Destination,
}

/// Entries sharing an initial letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGroup {
    pub letter: String,
    pub entries: Vec<IndexEntry>,
}

/// Build the index of every symbol in the table.
///
/// Groups are keyed by the uppercased first character of the entry name and
/// come out sorted; within a group entries are ordered by name, then kind.
pub fn build_index(table: &SymbolTable, extension: &str) -> Vec<IndexGroup> {
    let mut groups: BTreeMap<String, Vec<IndexEntry>> = BTreeMap::new();

    for symbol in table.iter() {
        let name = symbol.short_name();
        let letter: String = name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        groups.entry(letter).or_default().push(IndexEntry {
            name,
            kind: symbol.kind,
            qualified_name: symbol.qualified_name.to_string(),
            destination: Destination::for_symbol(symbol, extension),
        });
    }

    groups
        .into_iter()
        .map(|(letter, mut entries)| {
            entries.sort_by(|a, b| {
                a.name
                    .cmp(&b.name)
                    .then(a.kind.cmp(&b.kind))
                    .then_with(|| a.qualified_name.cmp(&b.qualified_name))
            });
            IndexGroup { letter, entries }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use crate::table::SymbolTableBuilder;

    #[test]
    fn test_grouped_by_initial() {
        let mut builder = SymbolTableBuilder::new();
        for (kind, name) in [
            (SymbolKind::Module, "tutorial"),
            (SymbolKind::Struct, "tutorial.Work"),
            (SymbolKind::StructField, "tutorial.Work.num1"),
            (SymbolKind::Exception, "tutorial.InvalidOperation"),
            (SymbolKind::Typedef, "tutorial.MyInteger"),
            (SymbolKind::Constant, "tutorial.INT32CONSTANT"),
        ] {
            builder.register(Symbol::new(kind, name).unwrap()).unwrap();
        }
        let index = build_index(&builder.seal(), ".html");

        let letters: Vec<&str> = index.iter().map(|g| g.letter.as_str()).collect();
        assert_eq!(letters, vec!["I", "M", "T", "W"]);

        let i: Vec<&str> = index[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(i, vec!["INT32CONSTANT", "InvalidOperation"]);

        let w = &index[3].entries;
        assert_eq!(w[0].name, "Work");
        assert_eq!(w[1].name, "Work.num1");
        assert_eq!(w[1].destination.href(), "tutorial.html#tutorial.Work.num1:struct_field");
    }

    #[test]
    fn test_lowercase_names_share_group() {
        let mut builder = SymbolTableBuilder::new();
        builder
            .register(Symbol::new(SymbolKind::Module, "shared").unwrap())
            .unwrap();
        builder
            .register(Symbol::new(SymbolKind::Struct, "shared.SharedStruct").unwrap())
            .unwrap();
        let index = build_index(&builder.seal(), ".html");
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].letter, "S");
        assert_eq!(index[0].entries[0].name, "SharedStruct");
        assert_eq!(index[0].entries[1].kind, SymbolKind::Module);
    }
}
