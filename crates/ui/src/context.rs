use std::sync::Arc;

use dioxus::prelude::*;
use services::{PracticeService, ProgressService};

pub trait UiApp: Send + Sync {
    fn generation_enabled(&self) -> bool;

    fn practice(&self) -> Arc<PracticeService>;
    fn progress(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    generation_enabled: bool,

    practice: Arc<PracticeService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            generation_enabled: app.generation_enabled(),
            practice: app.practice(),
            progress: app.progress(),
        }
    }

    /// False when no API key is configured; the solve tab shows a notice instead of failing.
    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Counter bumped whenever persisted progress changes.
///
/// Views that show history or scores read it inside their resources so they
/// reload after a submission or a clear.
#[derive(Clone, Copy, PartialEq)]
pub struct ProgressRevision(Signal<u64>);

impl ProgressRevision {
    #[must_use]
    pub fn new() -> Self {
        Self(Signal::new(0))
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        *self.0.read()
    }

    pub fn bump(&self) {
        let mut signal = self.0;
        let next = (*signal.peek()).wrapping_add(1);
        signal.set(next);
    }
}

impl Default for ProgressRevision {
    fn default() -> Self {
        Self::new()
    }
}
