//! Per-session state shared by both tasks: the credential and the model.
//!
//! A [`Session`] is built once at startup and handed by reference to
//! [`translate`](super::translate) and [`check_grammar`](super::check_grammar).
//! The credential is set from the sidebar field and read on every call.

use std::sync::Arc;

use serde_json::Value;

use crate::llm::{extract, ModelClient};

use super::TaskError;

/// Credential plus model handle for one UI session.
pub struct Session {
    credential: Option<String>,
    model: Arc<dyn ModelClient>,
}

impl Session {
    /// A session with no credential yet.
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            credential: None,
            model,
        }
    }

    /// Builder-style variant of [`set_credential`](Self::set_credential).
    pub fn with_credential(mut self, key: &str) -> Self {
        self.set_credential(key);
        self
    }

    /// Replace the credential.  Surrounding whitespace is dropped and a blank
    /// key clears it.
    pub fn set_credential(&mut self, key: &str) {
        let key = key.trim();
        self.credential = (!key.is_empty()).then(|| key.to_string());
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Validate, prompt the model and extract the JSON payload.
    ///
    /// The credential is checked before the input, and neither failure
    /// reaches the model.
    pub(crate) async fn request_payload(
        &self,
        input: &str,
        build_prompt: fn(&str) -> String,
    ) -> Result<Value, TaskError> {
        let key = self
            .credential
            .as_deref()
            .ok_or(TaskError::MissingCredential)?;
        if input.trim().is_empty() {
            return Err(TaskError::EmptyInput);
        }

        let prompt = build_prompt(input);
        let raw = self.model.generate(key, &prompt).await.map_err(|e| {
            log::warn!("task: model call failed: {e}");
            TaskError::from(e)
        })?;
        log::debug!("task: model replied (len={})", raw.len());

        extract(&raw).map_err(|e| {
            log::warn!("task: could not parse model reply: {e}");
            TaskError::from(e)
        })
    }
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

/// A scripted [`ModelClient`] that records how it was called.
#[cfg(test)]
pub struct StubModel {
    reply: Result<String, String>,
    calls: std::sync::atomic::AtomicUsize,
    last_prompt: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl StubModel {
    /// Always replies with `text`.
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: Default::default(),
            last_prompt: Default::default(),
        })
    }

    /// Always fails with a request error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: Default::default(),
            last_prompt: Default::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl ModelClient for StubModel {
    async fn generate(
        &self,
        _api_key: &str,
        prompt: &str,
    ) -> Result<String, crate::llm::LlmError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply
            .clone()
            .map_err(crate::llm::LlmError::Request)
    }
}
