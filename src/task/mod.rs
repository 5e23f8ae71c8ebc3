//! The two user-facing tasks: translate to Thai, and check grammar.
//!
//! Both follow the same path:
//!
//! ```text
//! credential? ─▶ input non-blank? ─▶ prompt ─▶ ModelClient::generate
//!                                             ─▶ extract ─▶ key check ─▶ typed result
//! ```
//!
//! and differ only in the prompt and the key they require.

pub mod error;
pub mod grammar;
pub mod session;
pub mod translate;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use error::TaskError;
pub use grammar::{check_grammar, GrammarReport};
pub use session::Session;
pub use translate::{translate, Translation};

#[cfg(test)]
pub use session::StubModel;
