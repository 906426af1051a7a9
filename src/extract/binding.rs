//! Flattened signature records produced by the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CanonicalType;

/// A single flattened `name type` pair.
///
/// An empty name means the entry was unnamed in the source (typical for
/// results).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: CanonicalType,
}

impl Binding {
    pub fn new(name: impl Into<String>, ty: CanonicalType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

/// An exported function, reduced to what glue generation needs.
///
/// `param_count` and `returns_count` are the number of *syntactic groups*
/// in the declaration, not the number of bindings. For `(a, b C.int)`
/// `param_count` is 1 while `params.len()` is 2. Consumers that need the
/// positional arity must use `params.len()` / `returns.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub param_count: usize,
    pub params: Vec<Binding>,
    pub returns_count: usize,
    pub returns: Vec<Binding>,
}

impl FunctionRecord {
    /// Comma-separated `name type` list of parameters.
    pub fn params_names(&self) -> String {
        join_bindings(&self.params)
    }

    /// Comma-separated `name type` list of results.
    pub fn returns_names(&self) -> String {
        join_bindings(&self.returns)
    }

    /// Bindings (parameters, then results) whose type was not recognized.
    pub fn unknown_bindings(&self) -> impl Iterator<Item = &Binding> {
        self.params
            .iter()
            .chain(self.returns.iter())
            .filter(|b| !b.ty.is_known())
    }

    /// Whether every parameter and result has a recognized foreign type.
    pub fn is_fully_known(&self) -> bool {
        self.unknown_bindings().next().is_none()
    }
}

impl fmt::Display for FunctionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "func {}({}) ({})",
            self.name,
            self.params_names(),
            self.returns_names()
        )
    }
}

fn join_bindings(bindings: &[Binding]) -> String {
    bindings
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_record() -> FunctionRecord {
        FunctionRecord {
            name: "Add".to_string(),
            param_count: 1,
            params: vec![
                Binding::new("a", CanonicalType::CInt),
                Binding::new("b", CanonicalType::CInt),
            ],
            returns_count: 1,
            returns: vec![Binding::new("", CanonicalType::CInt)],
        }
    }

    #[test]
    fn test_binding_display() {
        assert_eq!(Binding::new("s", CanonicalType::CCharPointer).to_string(), "s *C.char");
        // unnamed keeps the separating space
        assert_eq!(Binding::new("", CanonicalType::CInt).to_string(), " C.int");
    }

    #[test]
    fn test_record_display() {
        assert_eq!(
            add_record().to_string(),
            "func Add(a C.int, b C.int) ( C.int)"
        );
    }

    #[test]
    fn test_record_display_no_results() {
        let record = FunctionRecord {
            name: "Reset".to_string(),
            param_count: 0,
            params: vec![],
            returns_count: 0,
            returns: vec![],
        };
        assert_eq!(record.to_string(), "func Reset() ()");
    }

    #[test]
    fn test_group_count_differs_from_binding_count() {
        let record = add_record();
        assert_eq!(record.param_count, 1);
        assert_eq!(record.params.len(), 2);
    }

    #[test]
    fn test_unknown_bindings() {
        let mut record = add_record();
        assert!(record.is_fully_known());

        record.params.push(Binding::new("n", CanonicalType::Unknown));
        let unknown: Vec<_> = record.unknown_bindings().map(|b| b.name.as_str()).collect();
        assert_eq!(unknown, vec!["n"]);
        assert!(!record.is_fully_known());
    }

    #[test]
    fn test_binding_json_shape() {
        let json = serde_json::to_value(Binding::new("s", CanonicalType::CCharPointer)).unwrap();
        assert_eq!(json["name"], "s");
        assert_eq!(json["type"], "*C.char");
    }
}
