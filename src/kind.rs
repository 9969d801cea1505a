//! Symbol kinds and their naming rules.
//!
//! Every role and every registered symbol carries one of these kinds. The kind
//! decides how many segments a qualified name has and, for member kinds, which
//! kind owns it.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Kind of a documented Thrift object
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SymbolKind {
    Module,
    Constant,
    Typedef,
    Enum,
    EnumField,
    Struct,
    StructField,
    Exception,
    ExceptionField,
    Service,
    ServiceMethod,
}

impl SymbolKind {
    /// Kind that owns members of this kind, if this is a member kind
    pub fn owner(self) -> Option<SymbolKind> {
        match self {
            Self::EnumField => Some(Self::Enum),
            Self::StructField => Some(Self::Struct),
            Self::ExceptionField => Some(Self::Exception),
            Self::ServiceMethod => Some(Self::Service),
            _ => None,
        }
    }

    /// Field-like kinds whose targets have the form `Owner.Name`
    pub fn is_member(self) -> bool {
        self.owner().is_some()
    }

    /// Number of segments in a fully-qualified name of this kind
    ///
    /// - `module`: `Example`
    /// - top-level kinds: `Example.Calculator`
    /// - member kinds: `Example.Calculator.ping`
    pub fn qualified_len(self) -> usize {
        match self {
            Self::Module => 1,
            k if k.is_member() => 3,
            _ => 2,
        }
    }

    /// Fewest segments a reference target of this kind may have
    pub fn min_target_len(self) -> usize {
        match self {
            Self::Module => 1,
            k if k.is_member() => 2,
            _ => 1,
        }
    }

    /// Label shown in front of a symbol name in listings
    pub fn label(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Constant => "constant",
            Self::Typedef => "typedef",
            Self::Enum => "enum",
            Self::EnumField => "enum value",
            Self::Struct => "struct",
            Self::StructField => "field",
            Self::Exception => "exception",
            Self::ExceptionField => "field",
            Self::Service => "service",
            Self::ServiceMethod => "method",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_role_names_round_trip() {
        for kind in SymbolKind::iter() {
            let name = kind.as_ref().to_string();
            assert_eq!(SymbolKind::from_str(&name).unwrap(), kind);
        }
        assert_eq!(SymbolKind::ServiceMethod.as_ref(), "service_method");
        assert_eq!(SymbolKind::EnumField.to_string(), "enum_field");
    }

    #[test]
    fn test_unknown_role_name() {
        assert!(SymbolKind::from_str("namespace").is_err());
        assert!(SymbolKind::from_str("ServiceMethod").is_err());
    }

    #[test]
    fn test_qualified_len() {
        assert_eq!(SymbolKind::Module.qualified_len(), 1);
        assert_eq!(SymbolKind::Enum.qualified_len(), 2);
        assert_eq!(SymbolKind::ExceptionField.qualified_len(), 3);
        assert_eq!(SymbolKind::ServiceMethod.min_target_len(), 2);
        assert_eq!(SymbolKind::Constant.min_target_len(), 1);
    }

    #[test]
    fn test_member_owners() {
        assert_eq!(SymbolKind::EnumField.owner(), Some(SymbolKind::Enum));
        assert_eq!(SymbolKind::ExceptionField.owner(), Some(SymbolKind::Exception));
        assert_eq!(SymbolKind::Service.owner(), None);
        assert_eq!(SymbolKind::iter().filter(|k| k.is_member()).count(), 4);
    }
}
