//! Errors surfaced at the library boundary.
//!
//! The extraction core itself never fails; these cover reading and
//! parsing the input file and the "nothing to generate" condition.

use std::io;

use thiserror::Error;

/// Errors from running extraction over a file.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("no parser available for {0}")]
    UnsupportedFile(String),
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("{0}: source contains syntax errors")]
    Syntax(String),
    #[error("CGO exported functions not found in {0}. Nothing to generate.")]
    NoExports(String),
}

impl ExtractError {
    /// Whether this is the "no exported functions" condition rather than
    /// an I/O or parse failure.
    pub fn is_no_exports(&self) -> bool {
        matches!(self, ExtractError::NoExports(_))
    }
}

/// Errors from loading or validating a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid format {0:?}, must be 'text' or 'json'")]
    InvalidFormat(String),
}
