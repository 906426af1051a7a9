//! Export marker detection.

use crate::ast::CommentGroup;

/// Marker cgo uses to export a Go function to C.
pub const EXPORT_MARKER: &str = "//export";

/// Whether a declaration with this doc block is marked for export.
///
/// Only the last comment line counts, and it must start with `//export`
/// exactly. A missing doc block is a plain rejection.
pub fn is_exported(doc: Option<&CommentGroup>) -> bool {
    doc.and_then(CommentGroup::last)
        .map(|last| last.text.starts_with(EXPORT_MARKER))
        .unwrap_or(false)
}
