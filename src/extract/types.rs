//! Canonical foreign types and the type classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::TypeExpr;

/// Package name cgo uses for C references.
pub const FOREIGN_PACKAGE: &str = "C";

/// The closed set of foreign types recognized in exported signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalType {
    /// `*C.char`
    #[serde(rename = "*C.char")]
    CCharPointer,
    /// `C.int`
    #[serde(rename = "C.int")]
    CInt,
    /// Any type expression outside the recognized set.
    #[serde(rename = "N/A")]
    Unknown,
}

impl CanonicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::CCharPointer => "*C.char",
            CanonicalType::CInt => "C.int",
            CanonicalType::Unknown => "N/A",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CanonicalType::Unknown)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a type expression by its shape.
///
/// Only `Pkg.Name` and `*Pkg.Name` are inspected; every other shape is
/// `Unknown` without looking further. This never fails.
pub fn classify(expr: &TypeExpr) -> CanonicalType {
    let (package, name, is_pointer) = match expr {
        TypeExpr::Qualified { package, name } => (package, name, false),
        TypeExpr::Pointer(inner) => match inner.as_ref() {
            TypeExpr::Qualified { package, name } => (package, name, true),
            _ => return CanonicalType::Unknown,
        },
        _ => return CanonicalType::Unknown,
    };

    if package != FOREIGN_PACKAGE {
        return CanonicalType::Unknown;
    }

    match (name.as_str(), is_pointer) {
        ("char", true) => CanonicalType::CCharPointer,
        ("int", false) => CanonicalType::CInt,
        _ => CanonicalType::Unknown,
    }
}
