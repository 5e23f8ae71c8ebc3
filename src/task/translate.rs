//! English → Thai translation task.

use serde_json::Value;

use crate::export::{CsvDownload, CsvTable, TRANSLATION_FILE};
use crate::llm::translation_prompt;

use super::{Session, TaskError};

/// A successful translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
}

impl Translation {
    /// Read the `translation` string out of an extracted payload.
    pub fn from_payload(payload: &Value) -> Result<Self, TaskError> {
        payload
            .get("translation")
            .and_then(Value::as_str)
            .map(|text| Self {
                text: text.to_string(),
            })
            .ok_or(TaskError::SchemaMismatch {
                expected: "translation",
            })
    }

    /// One-row export with a single `Translation` column.
    pub fn csv_download(&self) -> CsvDownload {
        CsvDownload {
            label: "Download Translation as CSV".into(),
            file_name: TRANSLATION_FILE.into(),
            table: CsvTable {
                headers: vec!["Translation".into()],
                rows: vec![vec![self.text.clone()]],
            },
        }
    }
}

/// Translate `input` into Thai.
pub async fn translate(session: &Session, input: &str) -> Result<Translation, TaskError> {
    log::info!("translate: request (len={})", input.len());
    let payload = session.request_payload(input, translation_prompt).await?;
    Translation::from_payload(&payload)
}
