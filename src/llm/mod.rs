//! Model access for English Tool.
//!
//! This module provides:
//! * [`ModelClient`]: async trait, prompt in and raw reply text out.
//! * [`GeminiClient`]: Google Gemini `generateContent` backend.
//! * [`extract`]: lenient JSON extraction from a raw reply.
//! * [`translation_prompt`] / [`grammar_prompt`]: task prompt templates.
//! * [`LlmError`] / [`ExtractError`]: error variants for the above.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use english_tool::config::AppConfig;
//! use english_tool::llm::{extract, translation_prompt, GeminiClient, ModelClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let client = GeminiClient::from_config(&config.llm);
//!
//!     let raw = client
//!         .generate("my-api-key", &translation_prompt("Good morning"))
//!         .await
//!         .unwrap();
//!     let payload = extract(&raw).unwrap();
//!     println!("{}", payload["translation"]);
//! }
//! ```

pub mod client;
pub mod extract;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GeminiClient, LlmError, ModelClient};
pub use extract::{extract, unfence, ExtractError};
pub use prompt::{grammar_prompt, translation_prompt};
