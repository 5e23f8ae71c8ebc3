//! Core `ModelClient` trait and `GeminiClient` implementation.
//!
//! `GeminiClient` calls the Google Gemini `generateContent` REST endpoint.
//! Connection details come from [`LlmConfig`]; the API key is supplied per
//! call so the session can change it without rebuilding the client.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::LlmConfig;

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur while calling the model provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("model request timed out")]
    Timeout,

    /// The provider answered with a non-success status (bad key, quota …).
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The HTTP body was not the expected `generateContent` JSON.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The provider returned no candidate text (e.g. blocked by safety filters).
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ModelClient trait
// ---------------------------------------------------------------------------

/// A text-in, text-out language model.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn ModelClient>` between the UI and the pipeline worker.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `prompt` and return the model's raw text reply.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, LlmError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Calls `{base_url}/v1beta/models/{model}:generateContent`.
pub struct GeminiClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl GeminiClient {
    /// Build a `GeminiClient` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default client is used if the builder fails.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Full endpoint URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: &str) -> Value {
        serde_json::json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "temperature": self.config.temperature
            }
        })
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        log::debug!(
            "gemini: POST {} (prompt len={})",
            self.endpoint(),
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|json| provider_message(&json))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").into());
            log::warn!("gemini: HTTP {}: {}", status.as_u16(), message);
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|e| LlmError::Parse(e.to_string()))?;
        candidate_text(&json)
    }
}

/// Concatenate the text parts of the first candidate.
fn candidate_text(json: &Value) -> Result<String, LlmError> {
    let parts = json["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(LlmError::EmptyResponse)?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

/// `error.message` from a Gemini error body, if present.
fn provider_message(json: &Value) -> Option<String> {
    json["error"]["message"].as_str().map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_config() -> LlmConfig {
        LlmConfig {
            base_url: "https://generativelanguage.googleapis.com/".into(),
            model: "gemini-1.5-flash".into(),
            api_key: None,
            temperature: 0.2,
            timeout_secs: 10,
        }
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let client = GeminiClient::from_config(&make_config());
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_wraps_prompt() {
        let client = GeminiClient::from_config(&make_config());
        let body = client.request_body("hello");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn candidate_text_joins_parts() {
        let json = json!({
            "candidates": [{
                "content": { "parts": [ { "text": "```json\n" }, { "text": "{}\n```" } ] }
            }]
        });
        assert_eq!(candidate_text(&json).unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let json = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(candidate_text(&json), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn blank_text_is_empty_response() {
        let json = json!({ "candidates": [{ "content": { "parts": [ { "text": "  " } ] } }] });
        assert!(matches!(candidate_text(&json), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn provider_message_read_from_error_body() {
        let json = json!({ "error": { "code": 400, "message": "API key not valid." } });
        assert_eq!(provider_message(&json).as_deref(), Some("API key not valid."));
        assert_eq!(provider_message(&json!({})), None);
    }

    #[test]
    fn status_error_display_includes_message() {
        let err = LlmError::Status {
            status: 429,
            message: "Resource has been exhausted".into(),
        };
        assert_eq!(
            err.to_string(),
            "provider returned 429: Resource has been exhausted"
        );
    }

    // -----------------------------------------------------------------------
    // generate() against a one-shot local HTTP server
    // -----------------------------------------------------------------------

    /// Answer a single request with `status_line` and `body`, returning the
    /// base URL to point the client at.
    async fn serve_once(status_line: &'static str, content_type: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read the request head, then as much body as it announces.
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            let body_start = loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&request[..body_start]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() - body_start < content_length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}")
    }

    fn local_client(base_url: String) -> GeminiClient {
        GeminiClient {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            config: LlmConfig {
                base_url,
                ..make_config()
            },
        }
    }

    #[tokio::test]
    async fn html_error_page_keeps_status() {
        let base = serve_once(
            "503 Service Unavailable",
            "text/html",
            "<html><body>upstream unavailable</body></html>",
        )
        .await;

        let err = local_client(base).generate("k", "p").await.unwrap_err();
        match err {
            LlmError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn json_error_body_supplies_message() {
        let base = serve_once(
            "400 Bad Request",
            "application/json",
            r#"{"error": {"code": 400, "message": "API key not valid."}}"#,
        )
        .await;

        let err = local_client(base).generate("bad", "p").await.unwrap_err();
        assert_eq!(err.to_string(), "provider returned 400: API key not valid.");
    }

    #[tokio::test]
    async fn empty_error_body_falls_back_to_reason() {
        let base = serve_once("500 Internal Server Error", "text/plain", "").await;

        let err = local_client(base).generate("k", "p").await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::Status { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[tokio::test]
    async fn success_returns_candidate_text() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"translation\": \"แมว\"}"}]}}]}"#,
        )
        .await;

        let text = local_client(base).generate("k", "Cat").await.unwrap();
        assert_eq!(text, r#"{"translation": "แมว"}"#);
    }

    #[tokio::test]
    async fn non_json_success_body_is_parse_error() {
        let base = serve_once("200 OK", "text/html", "<html></html>").await;

        let err = local_client(base).generate("k", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    /// `GeminiClient` must be usable as `dyn ModelClient`.
    #[test]
    fn client_is_object_safe() {
        let client: Box<dyn ModelClient> = Box::new(GeminiClient::from_config(&make_config()));
        drop(client);
    }
}
