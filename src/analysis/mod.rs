//! Import analysis for LESS stylesheets.
//!
//! This module works out which symbols a stylesheet defines and which it uses,
//! and from that which of its `@import` statements contribute nothing.
//!
//! # Features
//!
//! - Collect exportable names: top-level variables, mixins, and `.class`/`#id`
//!   rulesets that another file could reference
//! - Collect importable names: every variable, mixin call, and extend target
//!   a file references, at any depth
//! - Enumerate imports together with the names each resolved file provides
//! - Flag imports none of whose names are referenced
//! - Delete the lines of those imports from the source text
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use lessprune::analysis::{Pruner, PruneRequest};
//! use lessprune::parser::NodeLessParser;
//!
//! let pruner = Pruner::new(NodeLessParser::new());
//! let request = PruneRequest::for_file("styles/app.less", vec![PathBuf::from("styles/lib")]);
//!
//! for unused in pruner.unused_imports(&request)? {
//!     println!("line {}: {}", unused.line, unused.path);
//! }
//! let outcome = pruner.remove_and_write_unused_imports(&request)?;
//! println!("removed {} import(s)", outcome.removed.len());
//! ```

pub mod exportable;
pub mod importable;
pub mod imports;
pub mod pruner;
pub mod rewrite;
pub mod unused;

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;
use crate::tree::TreeError;

// Re-export main types for convenience
pub use exportable::collect_exportables;
pub use importable::collect_importables;
pub use imports::{collect_available_imports, collect_imports, AvailableImport, ImportSite};
pub use pruner::{FileNames, PruneOutcome, PruneRequest, Pruner, UnusedImport};
pub use rewrite::{byte_offset, remove_import_lines};
pub use unused::{find_unused_imports, find_unused_imports_with, DetectOptions};

/// Errors that can occur while analysing or rewriting a file.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse less file \"{}\": {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
