//! Parser seam for LESS stylesheets.
//!
//! This crate does not parse LESS itself. A [`LessParser`] turns source text
//! into a [`Node`] tree with every `@import` already resolved and attached.
//! The production implementation is [`NodeLessParser`], which runs less.js
//! under Node. Any `Fn(&str, &ParseOptions) -> ParseResult<Node>` closure is
//! also a parser, which is how tests supply prebuilt trees.
//!
//! # Example
//!
//! ```ignore
//! use lessprune::parser::{LessParser, NodeLessParser, ParseOptions};
//!
//! let parser = NodeLessParser::new();
//! let root = parser.parse("@brand: red;", &ParseOptions::default())?;
//! ```

pub mod lessjs;
pub mod types;

use crate::tree::{Node, TreeError};

pub use lessjs::NodeLessParser;
pub use types::ParseOptions;

/// Errors that can occur while obtaining a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// less.js rejected the source.
    #[error("{message}{}", location(.filename, .line, .column))]
    Syntax {
        message: String,
        filename: Option<String>,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// The Node process could not be started or talked to.
    #[error("Failed to run less.js adapter: {0}")]
    Spawn(#[from] std::io::Error),

    /// The Node process exited unsuccessfully.
    #[error("less.js adapter exited with {status}: {stderr}")]
    Adapter { status: String, stderr: String },

    /// The adapter printed something other than a tree or an error.
    #[error("Unexpected less.js adapter output: {0}")]
    Protocol(String),

    /// The tree did not match the node model.
    #[error("Invalid syntax tree: {0}")]
    Tree(#[from] TreeError),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

fn location(filename: &Option<String>, line: &Option<usize>, column: &Option<usize>) -> String {
    let mut out = String::new();
    if let Some(filename) = filename {
        out.push_str(&format!(" in {filename}"));
    }
    if let Some(line) = line {
        out.push_str(&format!(" on line {line}"));
    }
    if let Some(column) = column {
        out.push_str(&format!(", column {column}"));
    }
    out
}

/// Produces a syntax tree from LESS source.
pub trait LessParser {
    /// Parses `source`, resolving imports according to `options`.
    fn parse(&self, source: &str, options: &ParseOptions) -> ParseResult<Node>;
}

impl<F> LessParser for F
where
    F: Fn(&str, &ParseOptions) -> ParseResult<Node>,
{
    fn parse(&self, source: &str, options: &ParseOptions) -> ParseResult<Node> {
        self(source, options)
    }
}
