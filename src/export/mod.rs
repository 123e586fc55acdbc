//! Export functionality for analysis results.
//!
//! This module renders per-file results for the command line, either as
//! human-readable text or as JSON.

pub mod json;
pub mod text;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::analysis::{FileNames, PruneOutcome, UnusedImport};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text - one block per file
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub file: PathBuf,
    /// Imports found unused (and removed, when `changed` is set).
    pub unused_imports: Vec<UnusedImport>,
    /// Whether the file was rewritten.
    pub changed: bool,
    /// Exportable and importable names, for the `names` command.
    pub names: Option<FileNames>,
    /// Why the file could not be processed.
    pub error: Option<String>,
}

impl FileReport {
    pub fn unused(file: impl Into<PathBuf>, unused_imports: Vec<UnusedImport>) -> Self {
        Self {
            file: file.into(),
            unused_imports,
            ..Self::default()
        }
    }

    pub fn names(file: impl Into<PathBuf>, names: FileNames) -> Self {
        Self {
            file: file.into(),
            names: Some(names),
            ..Self::default()
        }
    }

    pub fn failed(file: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

impl From<PruneOutcome> for FileReport {
    fn from(outcome: PruneOutcome) -> Self {
        Self {
            file: outcome.file,
            unused_imports: outcome.removed,
            changed: outcome.changed,
            ..Self::default()
        }
    }
}

/// Data container for export operations.
///
/// Holds the results of one command run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ExportData {
    pub files: Vec<FileReport>,
    /// Set when unused imports were only reported, not removed.
    pub check_only: bool,
}

impl ExportData {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self {
            files,
            check_only: false,
        }
    }

    /// Get count of files rewritten
    pub fn changed_count(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    /// Get count of unused imports across all files
    pub fn unused_count(&self) -> usize {
        self.files.iter().map(|f| f.unused_imports.len()).sum()
    }

    /// Get count of files that failed
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn sample_data() -> ExportData {
    use std::collections::BTreeSet;

    ExportData::new(vec![
        FileReport {
            file: PathBuf::from("styles/app.less"),
            unused_imports: vec![UnusedImport {
                path: "./legacy".to_string(),
                offset: 25,
                line: 2,
            }],
            changed: true,
            names: None,
            error: None,
        },
        FileReport::unused("styles/clean.less", Vec::new()),
        FileReport::failed("styles/broken.less", "Unrecognised input on line 3"),
        FileReport::names(
            "styles/vars.less",
            FileNames {
                exportable_names: BTreeSet::from(["@brand".to_string(), ".btn".to_string()]),
                importable_names: BTreeSet::new(),
            },
        ),
    ])
}
