//! What each panel shows after a request finishes.
//!
//! [`Presentation`] is plain data so the mapping from task outcome to
//! messages, table and download button can be tested without egui.

use crate::export::{CsvDownload, CsvTable};
use crate::task::{GrammarReport, TaskError, Translation};

/// Colour/intent of a message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Error,
}

/// One message box.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}

/// Everything a panel renders for one finished request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Presentation {
    /// Top-level heading above the whole result, if any.
    pub title: Option<String>,
    /// Section heading shown above the result, if any.
    pub heading: Option<String>,
    pub notices: Vec<Notice>,
    pub table: Option<CsvTable>,
    /// CSV offered for download; `None` disables the button.
    pub download: Option<CsvDownload>,
}

impl Presentation {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            notices: vec![Notice::error(message)],
            ..Self::default()
        }
    }
}

pub fn present_translation(outcome: &Result<Translation, TaskError>) -> Presentation {
    match outcome {
        Ok(translation) => Presentation {
            title: Some("Results:".into()),
            heading: Some("Thai Translation:".into()),
            notices: vec![Notice::success(translation.text.clone())],
            table: None,
            download: Some(translation.csv_download()),
        },
        Err(err) => Presentation::failed(err.to_string()),
    }
}

/// The grammar panel words parse failures without the "JSON" the
/// translation panel uses.
pub fn present_grammar(outcome: &Result<GrammarReport, TaskError>) -> Presentation {
    match outcome {
        Ok(report) if report.is_clean() => Presentation {
            title: None,
            heading: None,
            notices: vec![
                Notice::success("Grammar Check Complete!"),
                Notice::info("No grammatical errors found! Your text is correct."),
            ],
            table: None,
            download: None,
        },
        Ok(report) => Presentation {
            title: None,
            heading: Some("Errors Found:".into()),
            notices: vec![Notice::success("Grammar Check Complete!")],
            table: Some(report.table()),
            download: report.csv_download(),
        },
        Err(TaskError::MalformedResponse(msg)) => {
            Presentation::failed(format!("Error parsing response: {msg}"))
        }
        Err(err) => Presentation::failed(err.to_string()),
    }
}
