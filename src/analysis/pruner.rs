//! File-level entry points: parse a stylesheet, find its unused imports, and
//! strip them from the text.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::exportable::collect_exportables;
use super::importable::collect_importables;
use super::rewrite::{byte_offset, remove_import_lines};
use super::unused::{find_unused_imports_with, DetectOptions};
use super::{AnalysisError, AnalysisResult};
use crate::parser::{LessParser, ParseOptions};
use crate::tree::{Node, TreeError};

/// One file to analyse.
#[derive(Debug, Clone, Default)]
pub struct PruneRequest {
    /// The file's text. Read from `file_path` when absent.
    pub source: Option<String>,
    /// Location of the file. Relative imports resolve against its directory.
    pub file_path: PathBuf,
    /// Extra directories searched for imports.
    pub import_paths: Vec<PathBuf>,
}

impl PruneRequest {
    pub fn for_file(file_path: impl Into<PathBuf>, import_paths: Vec<PathBuf>) -> Self {
        Self {
            source: None,
            file_path: file_path.into(),
            import_paths,
        }
    }

    /// Analyse `source` instead of the file's current contents.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// An import found to be unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedImport {
    /// The import path as written.
    pub path: String,
    /// less.js source offset of the statement.
    pub offset: usize,
    /// 1-based line of the statement.
    pub line: usize,
}

/// Result of rewriting one file in place.
#[derive(Debug, Clone, Serialize)]
pub struct PruneOutcome {
    pub file: PathBuf,
    pub removed: Vec<UnusedImport>,
    /// Whether the file was written.
    pub changed: bool,
}

/// The names a file exports and the names it references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileNames {
    pub exportable_names: BTreeSet<String>,
    pub importable_names: BTreeSet<String>,
}

/// Runs the analysis pipeline over files using a [`LessParser`].
///
/// Each call handles one file from start to finish. Nothing is shared
/// between calls.
#[derive(Debug, Clone)]
pub struct Pruner<P> {
    parser: P,
    options: DetectOptions,
}

impl<P: LessParser> Pruner<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            options: DetectOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DetectOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses `source` as the file at `file_path`.
    pub fn parse_file(
        &self,
        source: &str,
        file_path: &Path,
        import_paths: &[PathBuf],
    ) -> AnalysisResult<Node> {
        let options = ParseOptions::for_file(file_path, import_paths.to_vec());
        let root = self
            .parser
            .parse(source, &options)
            .map_err(|source| AnalysisError::Parse {
                path: file_path.to_path_buf(),
                source,
            })?;
        tracing::debug!(file = %file_path.display(), "parsed");
        Ok(root)
    }

    /// Lists the unused imports of the requested file, in document order.
    pub fn unused_imports(&self, request: &PruneRequest) -> AnalysisResult<Vec<UnusedImport>> {
        let source = load_source(request)?;
        self.find_unused(&source, request)
    }

    /// Returns the file's text with the lines of its unused imports removed.
    pub fn remove_unused_imports(&self, request: &PruneRequest) -> AnalysisResult<String> {
        let source = load_source(request)?;
        let unused = self.find_unused(&source, request)?;
        strip(&source, &unused)
    }

    /// Like [`Pruner::remove_unused_imports`], then writes the result back to
    /// `request.file_path` when it differs from the input.
    pub fn remove_and_write_unused_imports(
        &self,
        request: &PruneRequest,
    ) -> AnalysisResult<PruneOutcome> {
        let source = load_source(request)?;
        let removed = self.find_unused(&source, request)?;
        let output = strip(&source, &removed)?;

        let changed = output != source;
        if changed {
            fs::write(&request.file_path, &output).map_err(|source| AnalysisError::Write {
                path: request.file_path.clone(),
                source,
            })?;
            tracing::info!(
                file = %request.file_path.display(),
                removed = removed.len(),
                "removed unused imports"
            );
        }

        Ok(PruneOutcome {
            file: request.file_path.clone(),
            removed,
            changed,
        })
    }

    /// Collects the exportable and importable names of the file at `path`.
    ///
    /// `import_paths` are searched for imports the way they are when pruning,
    /// so a file importing from a library directory still parses.
    pub fn file_names(&self, path: &Path, import_paths: &[PathBuf]) -> AnalysisResult<FileNames> {
        let source = read_file(path)?;
        let root = self.parse_file(&source, path, import_paths)?;

        Ok(FileNames {
            exportable_names: collect_exportables(&root)?.into_iter().collect(),
            importable_names: collect_importables(&root)?.into_iter().collect(),
        })
    }

    fn find_unused(
        &self,
        source: &str,
        request: &PruneRequest,
    ) -> AnalysisResult<Vec<UnusedImport>> {
        let root = self.parse_file(source, &request.file_path, &request.import_paths)?;

        find_unused_imports_with(&root, self.options)?
            .into_iter()
            .map(|site| -> AnalysisResult<UnusedImport> {
                let offset = site.index().ok_or_else(|| TreeError::MissingOffset {
                    path: site.path().to_string(),
                })?;
                Ok(UnusedImport {
                    path: site.path().to_string(),
                    offset,
                    line: line_number(source, byte_offset(source, offset)?),
                })
            })
            .collect()
    }
}

fn load_source(request: &PruneRequest) -> AnalysisResult<String> {
    match &request.source {
        Some(source) => Ok(source.clone()),
        None => read_file(&request.file_path),
    }
}

fn read_file(path: &Path) -> AnalysisResult<String> {
    fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn strip(source: &str, unused: &[UnusedImport]) -> AnalysisResult<String> {
    let offsets: Vec<usize> = unused.iter().map(|import| import.offset).collect();
    Ok(remove_import_lines(source, &offsets)?)
}

/// 1-based line containing byte `at`. `\r\n`, `\n`, and `\r` each end a line.
fn line_number(source: &str, at: usize) -> usize {
    let bytes = &source.as_bytes()[..at];
    let breaks = bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| {
            b == b'\n' || (b == b'\r' && source.as_bytes().get(i + 1) != Some(&b'\n'))
        })
        .count();
    breaks + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseError, ParseResult};
    use crate::tree::build::*;

    const SOURCE: &str = "@import (reference) 'a';\n@import (reference) 'b';\nbody { color: @x; }\n";
    const PRUNED: &str = "@import (reference) 'a';\nbody { color: @x; }\n";

    fn file_a() -> Node {
        root(vec![var_decl("@x", anonymous("red"))])
    }

    fn file_b() -> Node {
        root(vec![var_decl("@y", anonymous("blue"))])
    }

    fn body() -> Node {
        ruleset(&["body"], vec![property("color", value(vec![variable("@x")]))])
    }

    /// Stands in for less.js: recognises the two fixture texts.
    fn fixture_parser(source: &str, _: &ParseOptions) -> ParseResult<Node> {
        if source == SOURCE {
            Ok(root(vec![
                import("a", Some(file_a()), true).with_index(0),
                import("b", Some(file_b()), true).with_index(25),
                body(),
            ]))
        } else if source == PRUNED {
            Ok(root(vec![import("a", Some(file_a()), true).with_index(0), body()]))
        } else {
            Err(ParseError::Syntax {
                message: "Unrecognised input".to_string(),
                filename: None,
                line: Some(1),
                column: None,
            })
        }
    }

    fn request() -> PruneRequest {
        PruneRequest::for_file("styles/app.less", Vec::new()).with_source(SOURCE)
    }

    #[test]
    fn test_unused_imports_reports_path_and_line() {
        let pruner = Pruner::new(fixture_parser);
        let unused = pruner.unused_imports(&request()).unwrap();
        assert_eq!(
            unused,
            vec![UnusedImport {
                path: "b".to_string(),
                offset: 25,
                line: 2,
            }]
        );
    }

    #[test]
    fn test_remove_unused_imports() {
        let pruner = Pruner::new(fixture_parser);
        assert_eq!(pruner.remove_unused_imports(&request()).unwrap(), PRUNED);
    }

    #[test]
    fn test_removal_is_idempotent() {
        let pruner = Pruner::new(fixture_parser);
        let once = pruner.remove_unused_imports(&request()).unwrap();
        let again = pruner
            .remove_unused_imports(&request().with_source(once.clone()))
            .unwrap();
        assert_eq!(again, once);
    }

    #[test]
    fn test_parser_receives_file_and_import_paths() {
        let parser = |_: &str, options: &ParseOptions| -> ParseResult<Node> {
            assert_eq!(options.filename.as_deref(), Some(Path::new("styles/app.less")));
            assert_eq!(options.paths, vec![PathBuf::from("vendor")]);
            Ok(root(Vec::new()))
        };
        let request =
            PruneRequest::for_file("styles/app.less", vec![PathBuf::from("vendor")]).with_source("");
        assert_eq!(Pruner::new(parser).remove_unused_imports(&request).unwrap(), "");
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let pruner = Pruner::new(fixture_parser);
        let request = PruneRequest::for_file("broken.less", Vec::new()).with_source("body {");
        let err = pruner.remove_unused_imports(&request).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { ref path, .. } if path == Path::new("broken.less")));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = PruneRequest::for_file(dir.path().join("missing.less"), Vec::new());
        let err = Pruner::new(fixture_parser).unused_imports(&request).unwrap_err();
        assert!(matches!(err, AnalysisError::Read { .. }));
    }

    #[test]
    fn test_unused_import_without_offset_is_rejected() {
        let parser = |_: &str, _: &ParseOptions| -> ParseResult<Node> {
            Ok(root(vec![import("b", Some(file_b()), true)]))
        };
        let request = PruneRequest::for_file("app.less", Vec::new()).with_source("@import 'b';\n");
        let err = Pruner::new(parser).remove_unused_imports(&request).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Tree(TreeError::MissingOffset { ref path }) if path == "b"
        ));
    }

    #[test]
    fn test_reference_only_option_is_applied() {
        let parser = |_: &str, _: &ParseOptions| -> ParseResult<Node> {
            Ok(root(vec![import("b", Some(file_b()), false).with_index(0)]))
        };
        let request = PruneRequest::for_file("app.less", Vec::new()).with_source("@import 'b';\n");
        let pruner = Pruner::new(parser).with_options(DetectOptions {
            reference_only: true,
        });
        assert_eq!(pruner.remove_unused_imports(&request).unwrap(), "@import 'b';\n");
    }

    #[test]
    fn test_remove_and_write_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.less");
        fs::write(&path, SOURCE).unwrap();

        let pruner = Pruner::new(fixture_parser);
        let outcome = pruner
            .remove_and_write_unused_imports(&PruneRequest::for_file(&path, Vec::new()))
            .unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), PRUNED);

        let second = pruner
            .remove_and_write_unused_imports(&PruneRequest::for_file(&path, Vec::new()))
            .unwrap();
        assert!(!second.changed);
        assert!(second.removed.is_empty());
    }

    #[test]
    fn test_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.less");
        fs::write(&path, "@myVar: blue;\n").unwrap();

        let parser = |source: &str, _: &ParseOptions| -> ParseResult<Node> {
            assert_eq!(source, "@myVar: blue;\n");
            Ok(root(vec![var_decl("@myVar", anonymous("blue"))]))
        };
        let names = Pruner::new(parser).file_names(&path, &[]).unwrap();

        assert_eq!(names.exportable_names, BTreeSet::from(["@myVar".to_string()]));
        assert!(names.importable_names.is_empty());
    }

    #[test]
    fn test_file_names_searches_import_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.less");
        fs::write(&path, "@import 'colors';
.btn { color: @x; }
").unwrap();

        let parser = |_: &str, options: &ParseOptions| -> ParseResult<Node> {
            if options.paths != vec![PathBuf::from("vendor/styles")] {
                return Err(ParseError::Syntax {
                    message: "'colors' wasn't found".to_string(),
                    filename: None,
                    line: Some(1),
                    column: Some(0),
                });
            }
            Ok(root(vec![
                import("colors", Some(file_a()), false).with_index(0),
                ruleset(&[".btn"], vec![property("color", value(vec![variable("@x")]))]),
            ]))
        };
        let pruner = Pruner::new(parser);

        assert!(matches!(
            pruner.file_names(&path, &[]),
            Err(AnalysisError::Parse { .. })
        ));

        let names = pruner
            .file_names(&path, &[PathBuf::from("vendor/styles")])
            .unwrap();
        assert_eq!(names.exportable_names, BTreeSet::from([".btn".to_string()]));
        assert_eq!(names.importable_names, BTreeSet::from(["@x".to_string()]));
    }

    #[test]
    fn test_line_number_handles_all_terminators() {
        let source = "a\r\nb\nc\rd";
        assert_eq!(line_number(source, 0), 1);
        assert_eq!(line_number(source, source.find('b').unwrap()), 2);
        assert_eq!(line_number(source, source.find('c').unwrap()), 3);
        assert_eq!(line_number(source, source.find('d').unwrap()), 4);
    }
}
