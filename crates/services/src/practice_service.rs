use std::sync::Arc;

use mathgen_core::model::{Difficulty, HistoryEntry, MathProblem, parse_answer};

use crate::error::{ProblemRequestError, SubmitError};
use crate::problem_client::{Feedback, ProblemClient};
use crate::progress_service::ProgressService;

/// A problem on screen together with what has been submitted for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemAttempt {
    problem: MathProblem,
    difficulty: Difficulty,
    last_submitted: Option<String>,
}

impl ProblemAttempt {
    #[must_use]
    pub fn new(problem: MathProblem, difficulty: Difficulty) -> Self {
        Self {
            problem,
            difficulty,
            last_submitted: None,
        }
    }

    #[must_use]
    pub fn problem(&self) -> &MathProblem {
        &self.problem
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn last_submitted(&self) -> Option<&str> {
        self.last_submitted.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionOutcome {
    pub entry: HistoryEntry,
    pub feedback: Feedback,
}

/// Solve workflow: generate a problem, then check and record answers to it.
#[derive(Clone)]
pub struct PracticeService {
    problems: Arc<ProblemClient>,
    progress: Arc<ProgressService>,
}

impl PracticeService {
    #[must_use]
    pub fn new(problems: Arc<ProblemClient>, progress: Arc<ProgressService>) -> Self {
        Self { problems, progress }
    }

    /// Generate a fresh attempt at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns `ProblemRequestError` if generation or decoding fails.
    pub async fn generate(
        &self,
        difficulty: Difficulty,
    ) -> Result<ProblemAttempt, ProblemRequestError> {
        let problem = self.problems.request_problem(difficulty).await?;
        Ok(ProblemAttempt::new(problem, difficulty))
    }

    /// Check `raw_answer` against the attempt, record it and return feedback.
    ///
    /// Rejections happen before any service call and leave all state untouched.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Duplicate` if `raw_answer` is the literal submitted
    /// last time, or `SubmitError::InvalidAnswer` if it is not a number.
    pub async fn submit(
        &self,
        attempt: &mut ProblemAttempt,
        raw_answer: &str,
    ) -> Result<SubmissionOutcome, SubmitError> {
        if attempt.last_submitted.as_deref() == Some(raw_answer) {
            return Err(SubmitError::Duplicate);
        }
        let user_answer = parse_answer(raw_answer)?;

        let problem = &attempt.problem;
        let feedback = self
            .problems
            .request_feedback(problem.problem_text(), problem.final_answer(), user_answer)
            .await;
        let entry = self
            .progress
            .record_submission(
                problem.problem_text(),
                user_answer,
                problem.final_answer(),
                attempt.difficulty,
                feedback.is_correct,
            )
            .await;

        attempt.last_submitted = Some(raw_answer.to_string());
        Ok(SubmissionOutcome { entry, feedback })
    }
}
