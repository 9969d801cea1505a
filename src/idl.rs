//! Thrift IDL model as produced by `thrift --gen json`.
//!
//! Only the parts needed to enumerate documented symbols are modelled; other
//! keys in the generator output are ignored.

use crate::error::Result;
use crate::kind::SymbolKind;
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `.thrift` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlModule {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    /// Target language -> namespace
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
    #[serde(default)]
    pub typedefs: Vec<IdlTypedef>,
    #[serde(default)]
    pub enums: Vec<IdlEnum>,
    #[serde(default)]
    pub structs: Vec<IdlStruct>,
    #[serde(default)]
    pub constants: Vec<IdlConstant>,
    #[serde(default)]
    pub services: Vec<IdlService>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlTypedef {
    pub name: String,
    pub type_id: String,
    #[serde(default)]
    pub doc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlEnum {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub members: Vec<IdlEnumMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlEnumMember {
    pub name: String,
    pub value: i64,
    #[serde(default)]
    pub doc: String,
}

/// Struct, union or exception
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlStruct {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub is_exception: bool,
    #[serde(default)]
    pub is_union: bool,
    #[serde(default)]
    pub fields: Vec<IdlField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlField {
    pub key: i32,
    pub name: String,
    pub type_id: String,
    #[serde(default)]
    pub required: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlConstant {
    pub name: String,
    pub type_id: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub doc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlService {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub functions: Vec<IdlFunction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlFunction {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub oneway: bool,
    pub return_type_id: String,
    #[serde(default)]
    pub arguments: Vec<IdlField>,
    #[serde(default)]
    pub exceptions: Vec<IdlField>,
}

impl IdlModule {
    /// Symbols defined by this module, owners before members.
    ///
    /// Order: module, constants, typedefs, enums, structs and exceptions,
    /// services.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidSymbolName`] if a name is not a valid identifier.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        let module = &self.name;
        let mut symbols = vec![Symbol::new(SymbolKind::Module, module)?];

        for constant in &self.constants {
            symbols.push(Symbol::new(
                SymbolKind::Constant,
                &format!("{module}.{}", constant.name),
            )?);
        }
        for typedef in &self.typedefs {
            symbols.push(Symbol::new(
                SymbolKind::Typedef,
                &format!("{module}.{}", typedef.name),
            )?);
        }
        for e in &self.enums {
            let owner = format!("{module}.{}", e.name);
            symbols.push(Symbol::new(SymbolKind::Enum, &owner)?);
            for member in &e.members {
                symbols.push(Symbol::new(
                    SymbolKind::EnumField,
                    &format!("{owner}.{}", member.name),
                )?);
            }
        }
        for s in &self.structs {
            let (kind, field_kind) = if s.is_exception {
                (SymbolKind::Exception, SymbolKind::ExceptionField)
            } else {
                (SymbolKind::Struct, SymbolKind::StructField)
            };
            let owner = format!("{module}.{}", s.name);
            symbols.push(Symbol::new(kind, &owner)?);
            for field in &s.fields {
                symbols.push(Symbol::new(field_kind, &format!("{owner}.{}", field.name))?);
            }
        }
        for service in &self.services {
            let owner = format!("{module}.{}", service.name);
            symbols.push(Symbol::new(SymbolKind::Service, &owner)?);
            for function in &service.functions {
                symbols.push(Symbol::new(
                    SymbolKind::ServiceMethod,
                    &format!("{owner}.{}", function.name),
                )?);
            }
        }

        Ok(symbols)
    }
}
