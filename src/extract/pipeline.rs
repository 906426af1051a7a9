//! Per-declaration extraction and the single-pass driver.

use log::{debug, warn};

use crate::ast::{FuncDecl, SourceFile};

use super::{flatten, is_exported, FunctionRecord};

/// Outcome of a full pass over a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Accepted records in declaration order.
    pub records: Vec<FunctionRecord>,
    /// Number of declarations inspected.
    pub visited: usize,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Declarations that were inspected but not exported.
    pub fn skipped(&self) -> usize {
        self.visited - self.records.len()
    }
}

/// Build a record for a single declaration, or `None` if it is not exported.
pub fn extract_function(decl: &FuncDecl) -> Option<FunctionRecord> {
    if !is_exported(decl.doc.as_ref()) {
        return None;
    }

    Some(FunctionRecord {
        name: decl.name.clone(),
        param_count: decl.params.as_ref().map_or(0, |p| p.num_groups()),
        params: flatten(decl.params.as_ref()),
        returns_count: decl.results.as_ref().map_or(0, |r| r.num_groups()),
        returns: flatten(decl.results.as_ref()),
    })
}

/// Extraction driver.
#[derive(Debug, Clone)]
pub struct Pipeline {
    warn_unknown: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self { warn_unknown: true }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a warning for each binding whose type is not recognized.
    pub fn warn_unknown(mut self, warn: bool) -> Self {
        self.warn_unknown = warn;
        self
    }

    /// Visit one declaration, appending its record to `out` if exported.
    pub fn visit(&self, decl: &FuncDecl, out: &mut Extraction) {
        out.visited += 1;

        let record = match extract_function(decl) {
            Some(r) => r,
            None => {
                debug!("skipping {} (line {}): no //export marker", decl.name, decl.line);
                return;
            }
        };

        debug!("exported {} (line {}): {}", decl.name, decl.line, record);

        if self.warn_unknown {
            for binding in record.unknown_bindings() {
                let label = if binding.is_unnamed() {
                    "unnamed value"
                } else {
                    binding.name.as_str()
                };
                warn!("{}: unsupported type for {}", record.name, label);
            }
        }

        out.records.push(record);
    }

    /// Run over declarations in order, returning the accumulated result.
    pub fn run<'a, I>(&self, decls: I) -> Extraction
    where
        I: IntoIterator<Item = &'a FuncDecl>,
    {
        let mut out = Extraction::default();
        for decl in decls {
            self.visit(decl, &mut out);
        }
        out
    }

    pub fn run_file(&self, file: &SourceFile) -> Extraction {
        self.run(&file.decls)
    }
}

/// Extract all exported functions from a file with default settings.
pub fn extract_file(file: &SourceFile) -> Vec<FunctionRecord> {
    Pipeline::default().run_file(file).records
}
