//! Task runner: executes UI commands one at a time on the tokio runtime.
//!
//! [`TaskRunner`] owns the [`Session`] and responds to [`TaskCommand`]s
//! received over a `tokio::sync::mpsc` channel.
//!
//! # Flow
//!
//! ```text
//! TaskCommand::SetCredential(key) └─▶ session.set_credential
//! TaskCommand::Translate(text)    └─▶ translate     ─▶ TaskEvent::Finished
//! TaskCommand::CheckGrammar(text) └─▶ check_grammar ─▶ TaskEvent::Finished
//! ```
//!
//! Commands are handled strictly in order, so a credential change sent
//! before a submit is always applied before that submit runs.

use tokio::sync::mpsc;

use crate::task::{check_grammar, translate, Session};
use crate::view::{present_grammar, present_translation, Presentation};

use super::state::Panel;

/// Commands sent from the UI thread to the runner.
#[derive(Debug, Clone)]
pub enum TaskCommand {
    /// Replace the session credential (blank clears it).
    SetCredential(String),
    /// Translate the given text.
    Translate(String),
    /// Grammar-check the given text.
    CheckGrammar(String),
}

/// Events delivered from the runner back to the UI.
#[derive(Debug, Clone)]
pub enum TaskEvent {
    /// A request finished (successfully or not).
    Finished {
        panel: Panel,
        presentation: Presentation,
    },
}

/// Sequential executor for [`TaskCommand`]s.
pub struct TaskRunner {
    session: Session,
}

impl TaskRunner {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Run until `command_rx` is closed or the UI drops its event receiver.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<TaskCommand>,
        event_tx: mpsc::Sender<TaskEvent>,
    ) {
        while let Some(cmd) = command_rx.recv().await {
            if let Some(event) = self.handle(cmd).await {
                if event_tx.send(event).await.is_err() {
                    log::debug!("runner: UI gone, stopping");
                    break;
                }
            }
        }

        log::info!("runner: command channel closed, shutting down");
    }

    /// Execute one command; returns the event to report, if any.
    pub async fn handle(&mut self, cmd: TaskCommand) -> Option<TaskEvent> {
        match cmd {
            TaskCommand::SetCredential(key) => {
                self.session.set_credential(&key);
                log::debug!(
                    "runner: credential {}",
                    if self.session.has_credential() { "set" } else { "cleared" }
                );
                None
            }
            TaskCommand::Translate(text) => {
                let outcome = translate(&self.session, &text).await;
                Some(TaskEvent::Finished {
                    panel: Panel::Translate,
                    presentation: present_translation(&outcome),
                })
            }
            TaskCommand::CheckGrammar(text) => {
                let outcome = check_grammar(&self.session, &text).await;
                Some(TaskEvent::Finished {
                    panel: Panel::Grammar,
                    presentation: present_grammar(&outcome),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::StubModel;
    use crate::view::Tone;

    fn finished(event: Option<TaskEvent>) -> (Panel, Presentation) {
        match event.expect("event") {
            TaskEvent::Finished {
                panel,
                presentation,
            } => (panel, presentation),
        }
    }

    #[tokio::test]
    async fn set_credential_emits_nothing() {
        let mut runner = TaskRunner::new(Session::new(StubModel::replying("{}")));
        assert!(runner
            .handle(TaskCommand::SetCredential("key".into()))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn translate_without_credential_is_reported_inline() {
        let model = StubModel::replying("{\"translation\": \"x\"}");
        let mut runner = TaskRunner::new(Session::new(model.clone()));

        let (panel, view) = finished(runner.handle(TaskCommand::Translate("Hi".into())).await);
        assert_eq!(panel, Panel::Translate);
        assert_eq!(view.notices[0].tone, Tone::Error);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn credential_then_grammar_check() {
        let model = StubModel::replying("{\"errors\": [{\"error\": \"a\", \"correction\": \"an\"}]}");
        let mut runner = TaskRunner::new(Session::new(model.clone()));

        runner
            .handle(TaskCommand::SetCredential("key".into()))
            .await;
        let (panel, view) =
            finished(runner.handle(TaskCommand::CheckGrammar("a apple".into())).await);

        assert_eq!(panel, Panel::Grammar);
        assert_eq!(model.calls(), 1);
        assert!(view.download.is_some());
    }

    #[tokio::test]
    async fn run_processes_commands_in_order() {
        let model = StubModel::replying("```json\n{\"translation\": \"สวัสดี\"}\n```");
        let runner = TaskRunner::new(Session::new(model.clone()));

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::channel(4);

        command_tx
            .send(TaskCommand::SetCredential("key".into()))
            .unwrap();
        command_tx
            .send(TaskCommand::Translate("Hello".into()))
            .unwrap();
        drop(command_tx);

        runner.run(command_rx, event_tx).await;

        let (panel, view) = finished(event_rx.recv().await);
        assert_eq!(panel, Panel::Translate);
        assert_eq!(view.notices[0].text, "สวัสดี");
        assert!(event_rx.recv().await.is_none());
    }
}
