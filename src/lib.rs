//! cgoexport - extract cgo-exported function signatures from Go source.
//!
//! A Go function is exported to C by ending its doc comment with an
//! `//export Name` line. This crate finds those functions and reduces
//! each to a flat list of `name type` parameters and results, with C
//! types mapped onto a small closed set (`*C.char`, `C.int`, or N/A).
//! The result feeds glue code generators.
//!
//! # Architecture
//!
//! - `ast`: parser-independent source tree (declarations, comments, types)
//! - `frontend`: tree-sitter Go parser lowering into `ast`
//! - `extract`: the extraction core (filter, flatten, classify)
//! - `runner`: reads a file and applies the fatal-condition policy
//! - `config`: optional YAML configuration
//! - `report`: output formatting (text, JSON)

pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
#[cfg(feature = "tree-sitter")]
pub mod frontend;
pub mod report;
pub mod runner;

pub use ast::{FuncDecl, SourceFile, TypeExpr};
pub use config::{Config, OutputFormat};
pub use error::{ConfigError, ExtractError};
pub use extract::{
    classify, extract_file, extract_function, flatten, is_exported, Binding, CanonicalType,
    Extraction, FunctionRecord, Pipeline,
};
pub use runner::{FileReport, Runner};
