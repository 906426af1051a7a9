//! Extraction core: export filtering, signature flattening and type
//! classification.
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ FuncDecl │────▶│ is_exported  │────▶│ flatten         │
//! └──────────┘     │ (last line)  │     │ (+ classify)    │
//!                  └──────────────┘     └─────────────────┘
//!                                               │
//!                                               ▼
//!                                       ┌─────────────────┐
//!                                       │ FunctionRecord  │
//!                                       └─────────────────┘
//! ```
//!
//! Every step is total: a missing marker rejects, a missing list flattens
//! to nothing, and an unsupported type becomes `CanonicalType::Unknown`.

mod binding;
mod filter;
mod flatten;
mod pipeline;
mod types;

pub use binding::{Binding, FunctionRecord};
pub use filter::{is_exported, EXPORT_MARKER};
pub use flatten::flatten;
pub use pipeline::{extract_file, extract_function, Extraction, Pipeline};
pub use types::{classify, CanonicalType, FOREIGN_PACKAGE};
