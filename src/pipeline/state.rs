//! Per-panel state machine.
//!
//! Each tab owns a [`PanelState`]:
//!
//! ```text
//! Idle ──submit──▶ Busy ──task finished──▶ Done
//! Done ──submit──▶ Busy
//! ```
//!
//! While `Busy` the panel shows a spinner and its submit button is disabled,
//! so at most one request per panel is ever in flight.

use crate::view::Presentation;

/// The two tabs of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Translate,
    Grammar,
}

impl Panel {
    /// Tab title.
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Translate => "Translate to Thai",
            Panel::Grammar => "Grammar Checker",
        }
    }

    /// Caption above the text area.
    pub fn input_label(&self) -> &'static str {
        match self {
            Panel::Translate => "Enter your paragraph:",
            Panel::Grammar => "Enter text to check:",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Panel::Translate => "Submit",
            Panel::Grammar => "Check Grammar",
        }
    }

    /// Spinner caption while a request is running.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Panel::Translate => "Processing...",
            Panel::Grammar => "Checking grammar...",
        }
    }
}

/// State of one panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is running on the worker.
    Busy,
    /// The last request finished; its result (or error) is shown.
    Done(Presentation),
}

impl PanelState {
    /// ```
    /// use english_tool::pipeline::PanelState;
    ///
    /// assert!(!PanelState::Idle.is_busy());
    /// assert!(PanelState::Busy.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, PanelState::Busy)
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        match self {
            PanelState::Done(p) => Some(p),
            _ => None,
        }
    }
}
