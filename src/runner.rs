//! Runs extraction over a single source file.

use std::path::Path;

use log::{debug, info};

use crate::ast::SourceFile;
use crate::config::Config;
use crate::error::ExtractError;
use crate::extract::{Extraction, FunctionRecord, Pipeline};

/// Extraction result for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The file path, as given.
    pub path: String,
    /// Package name from the `package` clause.
    pub package: Option<String>,
    /// Exported functions and visit counts.
    pub extraction: Extraction,
}

impl FileReport {
    pub fn records(&self) -> &[FunctionRecord] {
        &self.extraction.records
    }
}

/// Reads, parses and extracts a file, applying the fatal-condition policy.
pub struct Runner {
    allow_empty: bool,
    allow_parse_errors: bool,
    warn_unknown: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            allow_empty: false,
            allow_parse_errors: false,
            warn_unknown: true,
        }
    }

    /// Build a runner from configuration file settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .allow_empty(config.should_allow_empty())
            .allow_parse_errors(config.should_allow_parse_errors())
            .warn_unknown(config.should_warn_unknown())
    }

    /// Set whether zero exported functions is a success.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Set whether files with syntax errors are still extracted.
    pub fn allow_parse_errors(mut self, allow: bool) -> Self {
        self.allow_parse_errors = allow;
        self
    }

    pub fn warn_unknown(mut self, warn: bool) -> Self {
        self.warn_unknown = warn;
        self
    }

    /// Read and extract a file from disk.
    pub fn run(&self, path: &Path) -> Result<FileReport, ExtractError> {
        let source = std::fs::read(path).map_err(|source| ExtractError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.run_source(path, &source)
    }

    /// Extract from in-memory source. `path` selects the frontend.
    pub fn run_source(&self, path: &Path, source: &[u8]) -> Result<FileReport, ExtractError> {
        let display = path.display().to_string();
        let file = parse_source(path, source)?;

        if file.has_parse_errors {
            if !self.allow_parse_errors {
                return Err(ExtractError::Syntax(display));
            }
            info!("{}: syntax errors, extracting intact declarations only", display);
        }

        self.extract(display, &file)
    }

    /// Run the pipeline over an already-lowered file.
    pub fn extract(&self, path: String, file: &SourceFile) -> Result<FileReport, ExtractError> {
        let extraction = Pipeline::new().warn_unknown(self.warn_unknown).run_file(file);
        debug!(
            "{}: {} exported of {} declarations",
            path,
            extraction.records.len(),
            extraction.visited
        );

        if extraction.is_empty() && !self.allow_empty {
            return Err(ExtractError::NoExports(path));
        }

        Ok(FileReport {
            path,
            package: file.package.clone(),
            extraction,
        })
    }
}

#[cfg(feature = "tree-sitter")]
fn parse_source(path: &Path, source: &[u8]) -> Result<SourceFile, ExtractError> {
    let frontend = crate::frontend::for_path(path)
        .ok_or_else(|| ExtractError::UnsupportedFile(path.display().to_string()))?;

    let to_parse_error = |e: anyhow::Error| ExtractError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let parsed = frontend.parse(path, source).map_err(to_parse_error)?;
    frontend.lower(&parsed).map_err(to_parse_error)
}

#[cfg(not(feature = "tree-sitter"))]
fn parse_source(path: &Path, _source: &[u8]) -> Result<SourceFile, ExtractError> {
    Err(ExtractError::UnsupportedFile(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, FuncDecl, TypeExpr};

    fn file_with(decls: Vec<FuncDecl>) -> SourceFile {
        SourceFile {
            package: Some("main".to_string()),
            decls,
            has_parse_errors: false,
        }
    }

    #[test]
    fn test_extract_empty_is_fatal_by_default() {
        let file = file_with(vec![FuncDecl::new("internal")]);

        let err = Runner::new().extract("lib.go".to_string(), &file).unwrap_err();
        assert!(err.is_no_exports());

        let report = Runner::new()
            .allow_empty(true)
            .extract("lib.go".to_string(), &file)
            .unwrap();
        assert!(report.records().is_empty());
        assert_eq!(report.extraction.visited, 1);
    }

    #[test]
    fn test_extract_keeps_package() {
        let file = file_with(vec![FuncDecl::new("Hello")
            .with_doc(&["//export Hello"])
            .with_params(vec![Field::named(
                &["name"],
                TypeExpr::pointer(TypeExpr::qualified("C", "char")),
            )])]);

        let report = Runner::new().extract("lib.go".to_string(), &file).unwrap();
        assert_eq!(report.package.as_deref(), Some("main"));
        assert_eq!(report.records().len(), 1);
        assert_eq!(report.records()[0].to_string(), "func Hello(name *C.char) ()");
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            allow_empty: Some(true),
            ..Default::default()
        };
        let file = file_with(vec![]);
        assert!(Runner::from_config(&config)
            .extract("lib.go".to_string(), &file)
            .is_ok());
    }

    #[test]
    fn test_run_missing_file() {
        let err = Runner::new()
            .run(Path::new("/definitely/not/here.go"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }

    #[test]
    #[cfg(feature = "tree-sitter")]
    fn test_run_source_unsupported_extension() {
        let err = Runner::new()
            .run_source(Path::new("lib.c"), b"int main() {}")
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFile(_)));
    }

    #[test]
    #[cfg(feature = "tree-sitter")]
    fn test_run_source_syntax_errors() {
        let source = b"package main\n\n//export Broken\nfunc Broken(a C.int {\n";

        let err = Runner::new()
            .run_source(Path::new("lib.go"), source)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Syntax(_)));
    }
}
