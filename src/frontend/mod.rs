//! Source frontends that lower a native parse tree into `ast::SourceFile`.
//!
//! Only Go is supported. The frontend is kept behind a trait so the
//! extraction core stays independent of tree-sitter.

mod go;

use std::path::Path;

use crate::ast::SourceFile;

pub use go::GoFrontend;

/// Holds a parsed tree-sitter tree and associated metadata.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The source bytes (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path (for error reporting).
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether tree-sitter had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Language-specific frontend trait.
///
/// Note: tree_sitter::Parser is not Sync, so implementations create a
/// parser per call.
pub trait Frontend: Send + Sync {
    /// Returns the language identifier (e.g., "go").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this frontend handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Partial parse errors are still returned as a valid tree with ERROR nodes.
    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile>;

    /// Lower the parse tree into the extraction input.
    fn lower(&self, parsed: &ParsedFile) -> anyhow::Result<SourceFile>;

    /// Check if this frontend handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}

/// Find a frontend for a path by its extension.
pub fn for_path(path: &Path) -> Option<Box<dyn Frontend>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let go = GoFrontend::new();
    if go.handles_extension(ext) {
        return Some(Box::new(go));
    }
    None
}
