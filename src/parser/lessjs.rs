//! less.js adapter.
//!
//! Runs a small script under Node that parses the source with less.js, lets
//! it resolve every `@import`, and prints the resulting tree as JSON. The
//! script strips the back-references and caches less.js keeps on its nodes,
//! so what arrives here is a plain tree that decodes straight into [`Node`].

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::types::{AdapterRequest, AdapterResponse, ParseOptions};
use super::{LessParser, ParseError, ParseResult};
use crate::tree::{Node, TreeError};

/// Environment variable the script reads to locate less.js.
const LESS_MODULE_ENV: &str = "LESSPRUNE_LESS_MODULE";

const ADAPTER_SCRIPT: &str = r#"
const less = require(process.env.LESSPRUNE_LESS_MODULE || 'less');

const SKIP = new Set([
  'parent', 'currentFileInfo', 'fileInfo', 'visibilityInfo', 'frames',
  'functionRegistry', 'functions', 'regexes', 'parsers', 'imports',
]);

const active = new WeakSet();

function plain(value) {
  if (value === null || value === undefined || typeof value === 'function') {
    return undefined;
  }
  if (Array.isArray(value)) {
    return value.map((item) => {
      const out = plain(item);
      return out === undefined ? null : out;
    });
  }
  if (typeof value !== 'object') {
    return typeof value === 'number' && !isFinite(value) ? undefined : value;
  }
  if (active.has(value)) {
    return undefined;
  }
  active.add(value);

  const out = {};
  if (typeof value.type === 'string') {
    out.type = value.type;
    const index = typeof value.getIndex === 'function' ? value.getIndex() : value._index;
    if (typeof index === 'number') {
      out.index = index;
    }
  }
  for (const key of Object.keys(value)) {
    if (key.startsWith('_') || SKIP.has(key) || key === 'type' || key === 'index') {
      continue;
    }
    const member = plain(value[key]);
    if (member !== undefined) {
      out[key] = member;
    }
  }
  if (out.type === 'Import' && !(out.root && typeof out.root.type === 'string')) {
    delete out.root;
  }

  active.delete(value);
  return out;
}

let input = '';
process.stdin.setEncoding('utf8');
process.stdin.on('data', (chunk) => { input += chunk; });
process.stdin.on('end', () => {
  const request = JSON.parse(input);
  const options = { processImports: true, paths: request.paths || [] };
  if (request.filename) {
    options.filename = request.filename;
  }
  less.parse(request.source, options, (err, root) => {
    if (err) {
      process.stdout.write(JSON.stringify({ error: {
        message: String(err.message || err),
        filename: err.filename || null,
        line: typeof err.line === 'number' ? err.line : null,
        column: typeof err.column === 'number' ? err.column : null,
      } }));
      return;
    }
    process.stdout.write(JSON.stringify({ root: plain(root) }));
  });
});
"#;

/// Parses LESS by running less.js under Node.
///
/// Requires a `node` binary and the `less` package resolvable from the
/// working directory, or an explicit module path set with
/// [`NodeLessParser::with_less_module`].
#[derive(Debug, Clone)]
pub struct NodeLessParser {
    node_binary: PathBuf,
    less_module: Option<String>,
}

impl Default for NodeLessParser {
    fn default() -> Self {
        Self {
            node_binary: PathBuf::from("node"),
            less_module: None,
        }
    }
}

impl NodeLessParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific Node executable instead of `node` on `PATH`.
    pub fn with_node_binary(mut self, node_binary: impl Into<PathBuf>) -> Self {
        self.node_binary = node_binary.into();
        self
    }

    /// Load less.js from `module` (a package name or path) instead of `less`.
    pub fn with_less_module(mut self, module: impl Into<String>) -> Self {
        self.less_module = Some(module.into());
        self
    }
}

impl LessParser for NodeLessParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> ParseResult<Node> {
        let request = serde_json::to_vec(&AdapterRequest::new(source, options))
            .map_err(|e| ParseError::Protocol(e.to_string()))?;

        tracing::debug!(
            node = %self.node_binary.display(),
            filename = ?options.filename,
            bytes = source.len(),
            "running less.js adapter"
        );

        let mut command = Command::new(&self.node_binary);
        command
            .arg("-e")
            .arg(ADAPTER_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(module) = &self.less_module {
            command.env(LESS_MODULE_ENV, module);
        }

        let mut child = command.spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            // The script reads all of stdin before writing anything, and
            // dropping the handle here closes the pipe so it sees EOF.
            // A broken pipe means the script died early; its stderr says why.
            if let Err(err) = stdin.write_all(&request) {
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(err.into());
                }
            }
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(ParseError::Adapter {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        decode_response(&output.stdout)
    }
}

/// Turns the adapter's stdout into a tree or a parse error.
fn decode_response(stdout: &[u8]) -> ParseResult<Node> {
    let response: AdapterResponse = serde_json::from_slice(stdout).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            ParseError::Protocol(e.to_string())
        } else {
            ParseError::Tree(TreeError::Json(e))
        }
    })?;

    if let Some(error) = response.error {
        return Err(ParseError::Syntax {
            message: error.message,
            filename: error.filename,
            line: error.line,
            column: error.column,
        });
    }

    response
        .root
        .ok_or_else(|| ParseError::Protocol("response has neither a tree nor an error".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeData, NodeKind};

    #[test]
    fn test_decode_tree_response() {
        let stdout = br#"{"root": {"type": "Ruleset", "root": true, "index": 0, "rules": [
            {"type": "Import", "index": 0, "options": {"reference": true},
             "path": {"type": "Quoted", "value": "./colors", "quote": "'"}}
        ]}}"#;
        let root = decode_response(stdout).unwrap();
        assert_eq!(root.kind(), NodeKind::Ruleset);
        assert_eq!(root.children()[0].kind(), NodeKind::Import);
    }

    #[test]
    fn test_decode_syntax_error() {
        let stdout = br#"{"error": {"message": "Unrecognised input", "filename": "a.less", "line": 2, "column": 5}}"#;
        let err = decode_response(stdout).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax { line: Some(2), column: Some(5), .. }
        ));
    }

    #[test]
    fn test_decode_garbage_is_protocol_error() {
        let err = decode_response(b"Cannot find module 'less'").unwrap_err();
        assert!(matches!(err, ParseError::Protocol(_)));
    }

    #[test]
    fn test_decode_empty_response_is_protocol_error() {
        let err = decode_response(b"{}").unwrap_err();
        assert!(matches!(err, ParseError::Protocol(_)));
    }

    #[test]
    fn test_decode_unknown_kind_is_tree_error() {
        let stdout = br#"{"root": {"type": "Ruleset", "rules": [{"type": "Hologram"}]}}"#;
        let err = decode_response(stdout).unwrap_err();
        assert!(matches!(err, ParseError::Tree(TreeError::Json(_))));
    }

    const STYLESHEET: &str = "@import (reference) 'a';\n\
                              @import (reference) 'b';\n\
                              @import (inline) 'c.css';\n\
                              .btn { color: @a-color; }\n";

    /// A parser backed by the less stand-in in `tests/fixtures`, or `None`
    /// when there is no `node` to run it.
    fn fake_less_parser() -> Option<NodeLessParser> {
        let available = Command::new("node")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);
        if !available {
            eprintln!("node not found, skipping adapter script test");
            return None;
        }
        let module = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("fake_less.js");
        Some(NodeLessParser::new().with_less_module(module.to_string_lossy().into_owned()))
    }

    #[test]
    fn test_adapter_script_flattens_less_objects() {
        let Some(parser) = fake_less_parser() else {
            return;
        };
        let root = parser
            .parse(STYLESHEET, &ParseOptions::for_file("/t/x.less", Vec::new()))
            .unwrap();

        let top: Vec<_> = root.children().iter().map(|c| (c.kind(), c.index)).collect();
        assert_eq!(
            top,
            vec![
                (NodeKind::Import, Some(0)),
                (NodeKind::Import, Some(25)),
                (NodeKind::Import, Some(50)),
                (NodeKind::Ruleset, Some(76)),
            ]
        );

        let NodeData::Import(resolved) = &root.children()[0].data else {
            panic!("expected an import");
        };
        assert!(resolved.options.reference);
        assert_eq!(resolved.imported_filename.as_deref(), Some("/fake/a"));
        assert_eq!(resolved.root.as_ref().map(|r| r.kind()), Some(NodeKind::Ruleset));

        let NodeData::Import(inline) = &root.children()[2].data else {
            panic!("expected an import");
        };
        assert!(inline.options.inline);
        assert!(inline.root.is_none());

        let mut variables = Vec::new();
        crate::tree::walk_all(&root.children()[3], |node| {
            if let NodeData::Variable(variable) = &node.data {
                variables.push((variable.name.clone(), node.index));
            }
        });
        assert_eq!(variables, vec![("@a-color".to_string(), Some(90))]);
    }

    #[test]
    fn test_adapter_script_reports_syntax_errors() {
        let Some(parser) = fake_less_parser() else {
            return;
        };
        let err = parser
            .parse("@a: 1;\n!!\n", &ParseOptions::for_file("/t/x.less", Vec::new()))
            .unwrap_err();
        assert!(matches!(
            &err,
            ParseError::Syntax { line: Some(2), column: Some(3), filename: Some(f), .. } if f == "/t/x.less"
        ));
        assert_eq!(
            err.to_string(),
            "Unrecognised input in /t/x.less on line 2, column 3"
        );
    }

    #[test]
    fn test_adapter_script_drives_pruning() {
        let Some(parser) = fake_less_parser() else {
            return;
        };
        let pruner = crate::analysis::Pruner::new(parser);
        let request =
            crate::analysis::PruneRequest::for_file("/t/x.less", Vec::new()).with_source(STYLESHEET);
        let pruned = pruner.remove_unused_imports(&request).unwrap();
        assert_eq!(
            pruned,
            "@import (reference) 'a';\n\
             @import (inline) 'c.css';\n\
             .btn { color: @a-color; }\n"
        );
    }

    #[test]
    fn test_missing_node_binary_is_spawn_error() {
        let parser = NodeLessParser::new().with_node_binary("/nonexistent/lessprune-node");
        let err = parser.parse("@a: 1;", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::Spawn(_)));
    }
}
