//! Shared types for the parser seam.
//!
//! [`ParseOptions`] is what callers hand to a [`super::LessParser`]. The
//! `Adapter*` types describe the JSON exchanged with the less.js adapter
//! script over stdin/stdout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tree::Node;

/// Options for parsing one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Nominal filename; relative imports resolve against its directory.
    pub filename: Option<PathBuf>,
    /// Extra directories searched for imports.
    pub paths: Vec<PathBuf>,
}

impl ParseOptions {
    /// Options for a file at `filename` with the given import search paths.
    pub fn for_file(filename: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            paths,
        }
    }
}

/// Request written to the adapter's stdin.
#[derive(Debug, Serialize)]
pub(crate) struct AdapterRequest<'a> {
    pub source: &'a str,
    pub filename: Option<String>,
    pub paths: Vec<String>,
}

impl<'a> AdapterRequest<'a> {
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            source,
            filename: options
                .filename
                .as_ref()
                .map(|f| f.display().to_string()),
            paths: options
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

/// Response read from the adapter's stdout. Exactly one member is set.
#[derive(Debug, Deserialize)]
pub(crate) struct AdapterResponse {
    #[serde(default)]
    pub root: Option<Node>,
    #[serde(default)]
    pub error: Option<SyntaxReport>,
}

/// A less.js parse error as reported by the adapter.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SyntaxReport {
    pub message: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub line: Option<usize>,
    #[serde(default)]
    pub column: Option<usize>,
}
