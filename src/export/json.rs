//! JSON export implementation.
//!
//! Exports analysis results in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use crate::analysis::{FileNames, UnusedImport};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    changed: usize,
    unused_imports: usize,
    failed: usize,
    check_only: bool,
}

/// Serializable file result for JSON output.
#[derive(Serialize)]
struct JsonFile<'a> {
    file: String,
    changed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unused_imports: Vec<UnusedImport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    names: Option<&'a FileNames>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    summary: JsonSummary,
    files: Vec<JsonFile<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let files: Vec<JsonFile> = data
            .files
            .iter()
            .map(|f| JsonFile {
                file: f.file.display().to_string(),
                changed: f.changed,
                unused_imports: f.unused_imports.clone(),
                names: f.names.as_ref(),
                error: f.error.as_deref(),
            })
            .collect();

        let export = JsonExport {
            summary: JsonSummary {
                files: data.files.len(),
                changed: data.changed_count(),
                unused_imports: data.unused_count(),
                failed: data.failed_count(),
                check_only: data.check_only,
            },
            files,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sample_data;

    fn export_json(data: &ExportData) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(data, &mut output).unwrap();
        let json_str = String::from_utf8(output).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = export_json(&sample_data());

        assert_eq!(parsed["summary"]["files"], 4);
        assert_eq!(parsed["summary"]["changed"], 1);
        assert_eq!(parsed["summary"]["unused_imports"], 1);
        assert_eq!(parsed["summary"]["failed"], 1);
        assert_eq!(parsed["summary"]["check_only"], false);
    }

    #[test]
    fn test_json_export_unused_imports() {
        let parsed = export_json(&sample_data());
        let files = parsed["files"].as_array().unwrap();

        assert_eq!(files[0]["file"], "styles/app.less");
        assert_eq!(files[0]["unused_imports"][0]["path"], "./legacy");
        assert_eq!(files[0]["unused_imports"][0]["line"], 2);
        assert_eq!(files[0]["unused_imports"][0]["offset"], 25);

        // Empty and absent members are omitted
        assert!(files[1].get("unused_imports").is_none());
        assert!(files[1].get("error").is_none());
        assert!(files[1].get("names").is_none());
    }

    #[test]
    fn test_json_export_error_and_names() {
        let parsed = export_json(&sample_data());
        let files = parsed["files"].as_array().unwrap();

        assert_eq!(files[2]["error"], "Unrecognised input on line 3");
        let exportable = files[3]["names"]["exportable_names"].as_array().unwrap();
        assert_eq!(exportable, &vec![serde_json::json!(".btn"), serde_json::json!("@brand")]);
        assert!(files[3]["names"]["importable_names"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_export_empty() {
        let parsed = export_json(&ExportData::default());
        assert_eq!(parsed["summary"]["files"], 0);
        assert!(parsed["files"].as_array().unwrap().is_empty());
    }
}
