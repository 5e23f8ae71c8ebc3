//! CSV export of task results.
//!
//! A [`CsvTable`] is a header row plus string rows.  It is built from JSON
//! records the way a spreadsheet would flatten them: the header is the union
//! of all record keys in first-seen order, missing cells are empty, strings
//! are written as-is and any other value as its JSON text.
//!
//! [`CsvDownload`] pairs a table with the file name it is offered under;
//! [`CsvDownload::save_in`] writes it into the export directory.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};

/// File name offered for a translation export.
pub const TRANSLATION_FILE: &str = "translation.csv";
/// File name offered for a grammar-error export.
pub const GRAMMAR_ERRORS_FILE: &str = "grammar_errors.csv";

// ---------------------------------------------------------------------------
// CsvTable
// ---------------------------------------------------------------------------

/// Tabular data with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Flatten JSON records into a table.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|h| record.get(h).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Serialise to CSV text with a header row.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("flushing CSV writer: {}", e.error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CsvDownload
// ---------------------------------------------------------------------------

/// A table offered to the user as a downloadable CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDownload {
    /// Button label, e.g. "Download Translation as CSV".
    pub label: String,
    /// File name, e.g. `translation.csv`.
    pub file_name: String,
    pub table: CsvTable,
}

impl CsvDownload {
    /// Write the CSV into `dir` (created if needed) and return the file path.
    /// An existing file of the same name is overwritten.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating export directory {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.table.to_csv()?)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("export: wrote {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn records(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn headers_are_union_in_first_seen_order() {
        let table = CsvTable::from_records(&records(json!([
            { "error": "go", "correction": "goes" },
            { "error": "a apple", "explanation": "use 'an'", "correction": "an apple" }
        ])));

        assert_eq!(table.headers, vec!["error", "correction", "explanation"]);
        assert_eq!(table.rows[0], vec!["go", "goes", ""]);
        assert_eq!(table.rows[1], vec!["a apple", "an apple", "use 'an'"]);
    }

    #[test]
    fn non_string_cells_use_json_text() {
        let table = CsvTable::from_records(&records(json!([
            { "position": 3, "severe": true, "note": null, "alts": ["is", "was"] }
        ])));

        assert_eq!(table.rows[0], vec!["3", "true", "", r#"["is","was"]"#]);
    }

    #[test]
    fn csv_has_header_and_quotes_when_needed() {
        let table = CsvTable {
            headers: vec!["Translation".into()],
            rows: vec![vec!["สวัสดี, \"โลก\"".into()]],
        };

        assert_eq!(
            table.to_csv().unwrap(),
            "Translation\n\"สวัสดี, \"\"โลก\"\"\"\n"
        );
    }

    #[test]
    fn empty_records_give_empty_table() {
        let table = CsvTable::from_records(&[]);
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn save_in_writes_named_file() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("nested");

        let download = CsvDownload {
            label: "Download Translation as CSV".into(),
            file_name: TRANSLATION_FILE.into(),
            table: CsvTable {
                headers: vec!["Translation".into()],
                rows: vec![vec!["แมว".into()]],
            },
        };

        let path = download.save_in(&target).expect("save");
        assert_eq!(path, target.join("translation.csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Translation\nแมว\n"
        );
    }
}
