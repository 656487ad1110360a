use std::sync::Arc;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use services::PracticeService;

use crate::context::ProgressRevision;

use super::state::{SolveAction, SolveState};

/// Solve tab state, owned by the layout so it outlives tab switches.
///
/// Generate and submit run on root-scope tasks: leaving the tab while a
/// request is in flight does not cancel it, and the result lands in this
/// state when the user comes back.
#[derive(Clone, Copy, PartialEq)]
pub struct SolveSession(Signal<SolveState>);

impl SolveSession {
    #[must_use]
    pub fn new() -> Self {
        Self(Signal::new(SolveState::default()))
    }

    #[must_use]
    pub fn state(&self) -> SolveState {
        self.0.read().clone()
    }

    pub fn apply(&self, action: SolveAction) -> bool {
        let mut signal = self.0;
        match signal.try_write() {
            Ok(mut state) => state.apply(action),
            Err(_) => {
                tracing::debug!("solve state dropped before an update arrived");
                false
            }
        }
    }

    pub fn generate(&self, practice: Arc<PracticeService>) {
        if !self.apply(SolveAction::GenerateStarted) {
            return;
        }
        let difficulty = self.0.peek().difficulty();
        let session = *self;
        spawn_forever(async move {
            let action = match practice.generate(difficulty).await {
                Ok(attempt) => SolveAction::Generated(attempt),
                Err(err) => SolveAction::GenerateFailed(err.user_message().to_string()),
            };
            session.apply(action);
        });
    }

    pub fn submit(&self, practice: Arc<PracticeService>, revision: ProgressRevision) {
        let (mut attempt, raw_answer) = {
            let current = self.0.peek();
            let Some(attempt) = current.attempt().cloned() else {
                return;
            };
            (attempt, current.answer().to_string())
        };
        if !self.apply(SolveAction::SubmitStarted) {
            return;
        }
        let session = *self;
        spawn_forever(async move {
            let action = match practice.submit(&mut attempt, &raw_answer).await {
                Ok(outcome) => {
                    revision.bump();
                    SolveAction::Submitted {
                        attempt,
                        feedback: outcome.feedback,
                    }
                }
                Err(err) => {
                    tracing::debug!(error = %err, "submission rejected");
                    SolveAction::SubmitRejected(err.user_message().to_string())
                }
            };
            session.apply(action);
        });
    }
}

impl Default for SolveSession {
    fn default() -> Self {
        Self::new()
    }
}
