//! English Tool: Thai translation and grammar checking backed by Gemini.
//!
//! * [`llm`]: model client, prompt templates, JSON extraction from replies.
//! * [`task`]: the translate / grammar-check requests and their errors.
//! * [`view`]: mapping from a finished request to what the UI shows.
//! * [`export`]: CSV tables and file export.
//! * [`pipeline`]: background runner and per-panel state.
//! * [`app`]: the egui window.
//! * [`config`]: `settings.toml` and platform paths.

pub mod app;
pub mod config;
pub mod export;
pub mod llm;
pub mod pipeline;
pub mod task;
pub mod view;
