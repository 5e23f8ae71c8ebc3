//! Grammar-check task.
//!
//! The model reports errors as free-form records; the fields are whatever
//! the model chose (the prompt suggests `error`, `correction`,
//! `explanation`).  Records are kept as JSON objects and only flattened for
//! display and export.

use serde_json::{Map, Value};

use crate::export::{CsvDownload, CsvTable, GRAMMAR_ERRORS_FILE};
use crate::llm::grammar_prompt;

use super::{Session, TaskError};

/// The grammatical errors found in one text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrammarReport {
    pub errors: Vec<Map<String, Value>>,
}

impl GrammarReport {
    /// Read the `errors` array out of an extracted payload.  Every element
    /// must be an object.
    pub fn from_payload(payload: &Value) -> Result<Self, TaskError> {
        const MISMATCH: TaskError = TaskError::SchemaMismatch { expected: "errors" };

        let items = payload
            .get("errors")
            .and_then(Value::as_array)
            .ok_or(MISMATCH)?;

        let errors = items
            .iter()
            .map(|item| item.as_object().cloned().ok_or(MISMATCH))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { errors })
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn table(&self) -> CsvTable {
        CsvTable::from_records(&self.errors)
    }

    /// Export of all records; `None` when there is nothing to export.
    pub fn csv_download(&self) -> Option<CsvDownload> {
        (!self.is_clean()).then(|| CsvDownload {
            label: "Download Errors as CSV".into(),
            file_name: GRAMMAR_ERRORS_FILE.into(),
            table: self.table(),
        })
    }
}

/// Check `input` for grammatical errors.
pub async fn check_grammar(session: &Session, input: &str) -> Result<GrammarReport, TaskError> {
    log::info!("grammar: request (len={})", input.len());
    let payload = session.request_payload(input, grammar_prompt).await?;
    let report = GrammarReport::from_payload(&payload)?;
    log::debug!("grammar: {} error(s) reported", report.errors.len());
    Ok(report)
}
