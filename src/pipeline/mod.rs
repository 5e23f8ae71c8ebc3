//! Background execution of UI requests.
//!
//! # Architecture
//!
//! ```text
//! EnglishToolApp (egui thread)
//!        │  TaskCommand (unbounded mpsc)
//!        ▼
//! TaskRunner::run()  ← async tokio task, one command at a time
//!        │
//!        ├─ SetCredential  → Session::set_credential
//!        ├─ Translate      → task::translate     → view::present_translation
//!        └─ CheckGrammar   → task::check_grammar → view::present_grammar
//!        │
//!        │  TaskEvent::Finished (mpsc)
//!        ▼
//! EnglishToolApp::poll_events() → PanelState::Done(presentation)
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use english_tool::config::AppConfig;
//! use english_tool::llm::GeminiClient;
//! use english_tool::pipeline::{TaskCommand, TaskRunner};
//! use english_tool::task::Session;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let session = Session::new(Arc::new(GeminiClient::from_config(&config.llm)));
//!
//!     let (command_tx, command_rx) = mpsc::unbounded_channel();
//!     let (event_tx, mut event_rx) = mpsc::channel(16);
//!     tokio::spawn(TaskRunner::new(session).run(command_rx, event_tx));
//!
//!     command_tx.send(TaskCommand::SetCredential("my-api-key".into())).unwrap();
//!     command_tx.send(TaskCommand::Translate("Good morning".into())).unwrap();
//!     println!("{:?}", event_rx.recv().await);
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{TaskCommand, TaskEvent, TaskRunner};
pub use state::{Panel, PanelState};
