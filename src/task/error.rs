//! Error taxonomy for a single translate / grammar-check request.

use thiserror::Error;

use crate::llm::{ExtractError, LlmError};

/// Every way a request can fail.  All are terminal for that request; the
/// user may resubmit.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Submit pressed without an API key.  No model call is made.
    #[error("Please enter your Gemini API key in the sidebar first!")]
    MissingCredential,

    /// Submit pressed with blank input.  No model call is made.
    #[error("Please enter text!")]
    EmptyInput,

    /// No JSON could be parsed from the model reply.
    #[error("Error parsing JSON response: {0}")]
    MalformedResponse(String),

    /// The reply parsed but lacks the key the task needs, or it has the
    /// wrong type.
    #[error("Response is missing the `{expected}` field")]
    SchemaMismatch { expected: &'static str },

    /// The model call itself failed (network, auth, quota …).
    #[error("Error: {0}")]
    Provider(String),
}

impl From<LlmError> for TaskError {
    fn from(e: LlmError) -> Self {
        TaskError::Provider(e.to_string())
    }
}

impl From<ExtractError> for TaskError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Malformed(msg) => TaskError::MalformedResponse(msg),
        }
    }
}
