//! Syntax tree model for parsed LESS stylesheets.
//!
//! The tree itself is produced by less.js (see [`crate::parser`]) and decoded
//! into the closed [`NodeData`] sum type. This module provides:
//!
//! - the node types and [`NodeKind`] classification ([`types`])
//! - traversal primitives ([`walk`])
//! - a one-line diagnostic rendering of a node ([`trace`])
//! - helpers for assembling trees by hand ([`build`])
//!
//! # Example
//!
//! ```
//! use lessprune::tree::{self, NodeKind};
//!
//! let json = r#"{"type": "Ruleset", "root": true, "rules": [
//!     {"type": "Declaration", "name": "@gutter", "variable": true,
//!      "value": {"type": "Anonymous", "value": "12px"}}
//! ]}"#;
//! let root = tree::from_json(json).unwrap();
//!
//! let mut kinds = Vec::new();
//! tree::walk_all(&root, |node| kinds.push(node.kind()));
//! assert_eq!(kinds, vec![NodeKind::Ruleset, NodeKind::Declaration, NodeKind::Anonymous]);
//! ```

pub mod build;
pub mod trace;
pub mod types;
pub mod walk;

use thiserror::Error;

pub use types::{
    DeclarationName, Import, ImportOptions, Node, NodeData, NodeKind, Ruleset, Selector, Value,
};
pub use walk::{for_each_top_level_child, walk, walk_all, WalkAction, WalkOptions};

/// Errors raised when a tree does not have the shape this crate relies on.
///
/// These indicate a contract violation by the tree's producer, never a
/// recoverable condition.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Failed to decode syntax tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown node kind: \"{0}\"")]
    UnknownKind(String),

    #[error("Malformed {kind} node: {reason}\n  {dump}")]
    Structure {
        kind: NodeKind,
        reason: String,
        dump: String,
    },

    #[error("Import of \"{path}\" has no source offset")]
    MissingOffset { path: String },

    #[error("Source offset {offset} is past the end of the file")]
    OffsetOutOfRange { offset: usize },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

impl TreeError {
    /// Builds a structural violation for `node`, logging a dump of the node.
    pub fn structure(node: &Node, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let dump = trace::node_to_line_string(node).unwrap_or_else(|_| format!("{:?}", node.data));
        tracing::error!(kind = %node.kind(), %reason, %dump, "unexpected syntax tree shape");
        TreeError::Structure {
            kind: node.kind(),
            reason,
            dump,
        }
    }
}

/// Decodes a tree from the JSON printed by the less.js adapter.
pub fn from_json(json: &str) -> TreeResult<Node> {
    Ok(serde_json::from_str(json)?)
}
