use mathgen_core::model::Difficulty;
use services::{Feedback, ProblemAttempt};

/// The request currently in flight. Only one is allowed at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pending {
    Generating,
    Checking,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Banner {
    Feedback(Feedback),
    Notice(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SolveAction {
    SelectDifficulty(Difficulty),
    GenerateStarted,
    Generated(ProblemAttempt),
    GenerateFailed(String),
    EditAnswer(String),
    SubmitStarted,
    Submitted {
        attempt: ProblemAttempt,
        feedback: Feedback,
    },
    SubmitRejected(String),
    ToggleHint,
    ToggleSteps,
    TryAgain,
}

/// Everything the solve tab shows, updated only through [`SolveState::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct SolveState {
    difficulty: Difficulty,
    pending: Option<Pending>,
    attempt: Option<ProblemAttempt>,
    answer: String,
    show_hint: bool,
    show_steps: bool,
    banner: Option<Banner>,
}

impl Default for SolveState {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            pending: None,
            attempt: None,
            answer: String::new(),
            show_hint: false,
            show_steps: false,
            banner: None,
        }
    }
}

impl SolveState {
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn attempt(&self) -> Option<&ProblemAttempt> {
        self.attempt.as_ref()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    #[must_use]
    pub fn show_steps(&self) -> bool {
        self.show_steps
    }

    #[must_use]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.attempt.is_some() && !self.answer.trim().is_empty()
    }

    /// Apply `action` and report whether it was accepted.
    ///
    /// Starting a request while another is in flight is refused, and so are
    /// edits to the difficulty or the answer. Completions only land while the
    /// matching request is pending.
    pub fn apply(&mut self, action: SolveAction) -> bool {
        match action {
            SolveAction::SelectDifficulty(difficulty) => {
                if self.is_busy() {
                    return false;
                }
                self.difficulty = difficulty;
            }
            SolveAction::GenerateStarted => {
                if self.is_busy() {
                    return false;
                }
                self.pending = Some(Pending::Generating);
                self.banner = None;
            }
            SolveAction::Generated(attempt) => {
                if self.pending != Some(Pending::Generating) {
                    return false;
                }
                self.pending = None;
                self.attempt = Some(attempt);
                self.answer.clear();
                self.show_hint = false;
                self.show_steps = false;
                self.banner = None;
            }
            SolveAction::GenerateFailed(message) => {
                if self.pending != Some(Pending::Generating) {
                    return false;
                }
                self.pending = None;
                self.banner = Some(Banner::Notice(message));
            }
            SolveAction::EditAnswer(answer) => {
                if self.is_busy() || self.attempt.is_none() {
                    return false;
                }
                self.answer = answer;
            }
            SolveAction::SubmitStarted => {
                if !self.can_submit() {
                    return false;
                }
                self.pending = Some(Pending::Checking);
            }
            SolveAction::Submitted { attempt, feedback } => {
                if self.pending != Some(Pending::Checking) {
                    return false;
                }
                self.pending = None;
                self.attempt = Some(attempt);
                self.banner = Some(Banner::Feedback(feedback));
            }
            SolveAction::SubmitRejected(message) => {
                if self.pending != Some(Pending::Checking) {
                    return false;
                }
                self.pending = None;
                self.banner = Some(Banner::Notice(message));
            }
            SolveAction::ToggleHint => {
                if self.attempt.is_none() {
                    return false;
                }
                self.show_hint = !self.show_hint;
            }
            SolveAction::ToggleSteps => {
                if self.attempt.is_none() {
                    return false;
                }
                self.show_steps = !self.show_steps;
            }
            SolveAction::TryAgain => {
                let wrong = matches!(
                    &self.banner,
                    Some(Banner::Feedback(feedback)) if !feedback.is_correct
                );
                if !wrong || self.is_busy() {
                    return false;
                }
                self.answer.clear();
                self.banner = None;
            }
        }
        true
    }
}
