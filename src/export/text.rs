//! Plain text export implementation.
//!
//! One block per file that has something to report, followed by a summary
//! line. Files with nothing to report are left out.

use super::{ExportData, Exporter, FileReport};
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        for file in data.files.iter().filter(|f| has_details(f)) {
            writeln!(writer, "{}", file.file.display())?;

            if let Some(error) = &file.error {
                writeln!(writer, "  error: {}", error)?;
            }

            let verb = if file.changed && !data.check_only {
                "removed"
            } else {
                "unused"
            };
            for import in &file.unused_imports {
                writeln!(writer, "  {} line {}: {}", verb, import.line, import.path)?;
            }

            if let Some(names) = &file.names {
                writeln!(writer, "  exportable: {}", join(&names.exportable_names))?;
                writeln!(writer, "  importable: {}", join(&names.importable_names))?;
            }
        }

        if data.files.iter().any(has_details) {
            writeln!(writer)?;
        }

        let action = if data.check_only { "would change" } else { "changed" };
        writeln!(
            writer,
            "{} file(s), {} {}, {} unused import(s), {} failed",
            data.files.len(),
            data.changed_count(),
            action,
            data.unused_count(),
            data.failed_count()
        )
    }
}

fn has_details(file: &FileReport) -> bool {
    file.error.is_some() || !file.unused_imports.is_empty() || file.names.is_some()
}

fn join(names: &BTreeSet<String>) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
