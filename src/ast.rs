//! Parser-independent source tree handed to the extraction core.
//!
//! Frontends (see `frontend`) lower their native parse trees into these
//! types. The core never sees tree-sitter nodes, so it can be driven from
//! hand-built trees in tests.

use std::fmt;

/// A single parsed Go source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Package name from the `package` clause, if present.
    pub package: Option<String>,
    /// Function and method declarations in source order.
    pub decls: Vec<FuncDecl>,
    /// Whether the parser recovered from syntax errors.
    pub has_parse_errors: bool,
}

/// A function (or method) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// The function name.
    pub name: String,
    /// For methods: the receiver type text (e.g. `*Config`).
    pub receiver: Option<String>,
    /// The doc comment block directly above the declaration.
    pub doc: Option<CommentGroup>,
    /// Parameter groups. Always present for parsed declarations.
    pub params: Option<FieldList>,
    /// Result groups. `None` when the function returns nothing.
    pub results: Option<FieldList>,
    /// Line of the `func` keyword (1-indexed).
    pub line: usize,
}

impl FuncDecl {
    /// Create a declaration with no doc, no receiver and empty parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            doc: None,
            params: Some(FieldList::default()),
            results: None,
            line: 0,
        }
    }

    pub fn with_doc(mut self, lines: &[&str]) -> Self {
        self.doc = Some(CommentGroup::from_lines(lines));
        self
    }

    pub fn with_params(mut self, fields: Vec<Field>) -> Self {
        self.params = Some(FieldList::new(fields));
        self
    }

    pub fn with_results(mut self, fields: Vec<Field>) -> Self {
        self.results = Some(FieldList::new(fields));
        self
    }
}

/// A single comment, raw text including its `//` or `/* */` delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// A run of adjacent comments with no blank line between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn from_lines(lines: &[&str]) -> Self {
        Self {
            list: lines
                .iter()
                .map(|l| Comment {
                    text: (*l).to_string(),
                })
                .collect(),
        }
    }

    /// The last comment in the group.
    pub fn last(&self) -> Option<&Comment> {
        self.list.last()
    }
}

/// One declaration group: zero or more names sharing a single type.
///
/// `a, b C.int` is one field with two names; an unnamed result `C.int`
/// is one field with no names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl Field {
    pub fn named(names: &[&str], ty: TypeExpr) -> Self {
        Self {
            names: names.iter().map(|n| (*n).to_string()).collect(),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }
}

/// A parenthesised parameter or result list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    pub list: Vec<Field>,
}

impl FieldList {
    pub fn new(list: Vec<Field>) -> Self {
        Self { list }
    }

    /// Number of syntactic groups.
    ///
    /// This is NOT the number of names: `(a, b C.int)` has one group and
    /// two names. See `FunctionRecord` for why both are kept.
    pub fn num_groups(&self) -> usize {
        self.list.len()
    }
}

/// Structural shape of a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Plain identifier, e.g. `int`, `string`, `Config`.
    Ident(String),
    /// Package-qualified identifier, e.g. `C.int`.
    Qualified { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`
    Array { len: String, elem: Box<TypeExpr> },
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `func(...) ...`, kept as source text.
    Func(String),
    /// `...T` in a final parameter.
    Variadic(Box<TypeExpr>),
    /// `(T)`
    Paren(Box<TypeExpr>),
    /// Anything else (channels, generics, struct literals, ...).
    Other { kind: String, text: String },
}

impl TypeExpr {
    pub fn ident(name: &str) -> Self {
        TypeExpr::Ident(name.to_string())
    }

    pub fn qualified(package: &str, name: &str) -> Self {
        TypeExpr::Qualified {
            package: package.to_string(),
            name: name.to_string(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => write!(f, "{}", name),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Func(text) => write!(f, "{}", text),
            TypeExpr::Variadic(elem) => write!(f, "...{}", elem),
            TypeExpr::Paren(inner) => write!(f, "({})", inner),
            TypeExpr::Other { text, .. } => write!(f, "{}", text),
        }
    }
}
