//! thriftdoc: cross-references for Thrift IDL documentation.
//!
//! Documentation text refers to IDL definitions with roles such as
//! ``:thrift:struct:`Work` `` or ``:thrift:enum_field:`the ADD operation <Operation.ADD>` ``.
//! This crate builds a [`SymbolTable`] from `thrift --gen json` output, parses
//! those roles into [`Reference`]s, resolves them with a [`Resolver`] and
//! renders the results as links.
//!
//! ```
//! use thriftdoc::{LinkFormat, Resolver, Symbol, SymbolKind, SymbolTableBuilder, parse_role, render};
//!
//! let mut builder = SymbolTableBuilder::new();
//! builder.register(Symbol::new(SymbolKind::Module, "tutorial")?)?;
//! builder.register(Symbol::new(SymbolKind::Struct, "tutorial.Work")?)?;
//! let table = builder.seal();
//!
//! let reference = parse_role(":thrift:struct:`Work`")?;
//! let link = Resolver::new(&table).link(&reference, Some("tutorial"), ".html")?;
//! assert_eq!(render(&link, LinkFormat::Markdown), "[Work](tutorial.html#tutorial.Work:struct)");
//! # Ok::<(), thriftdoc::Error>(())
//! ```

pub mod cmd;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod idl;
pub mod index;
pub mod kind;
pub mod load;
pub mod page;
pub mod reference;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod symbol;
pub mod table;
pub mod ui;

pub use config::Config;
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLevel};
pub use error::{Error, Result};
pub use kind::SymbolKind;
pub use page::{PageFormat, module_page};
pub use reference::{Reference, SourceLocation, Target, find_roles, parse_reference, parse_role};
pub use render::{Destination, LinkFormat, LinkStyle, ResolvedLink, expand_roles, render};
pub use resolve::Resolver;
pub use symbol::{QualifiedName, Symbol};
pub use table::{SymbolId, SymbolTable, SymbolTableBuilder};
