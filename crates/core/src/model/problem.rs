use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("problem text must not be empty")]
    EmptyText,
    #[error("final answer must be a finite number")]
    NonFiniteAnswer,
}

/// A generated word problem together with its expected numeric answer.
#[derive(Debug, Clone, PartialEq)]
pub struct MathProblem {
    problem_text: String,
    final_answer: f64,
    hint: Option<String>,
    steps: Vec<String>,
}

impl MathProblem {
    /// Build a problem, normalizing the optional parts.
    ///
    /// A blank hint becomes `None` and blank steps are dropped; step order is kept.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError` if the text is blank or the answer is not finite.
    pub fn new(
        problem_text: impl Into<String>,
        final_answer: f64,
        hint: Option<String>,
        steps: Vec<String>,
    ) -> Result<Self, ProblemError> {
        let problem_text = problem_text.into().trim().to_string();
        if problem_text.is_empty() {
            return Err(ProblemError::EmptyText);
        }
        if !final_answer.is_finite() {
            return Err(ProblemError::NonFiniteAnswer);
        }

        let hint = hint
            .map(|hint| hint.trim().to_string())
            .filter(|hint| !hint.is_empty());
        let steps = steps
            .into_iter()
            .map(|step| step.trim().to_string())
            .filter(|step| !step.is_empty())
            .collect();

        Ok(Self {
            problem_text,
            final_answer,
            hint,
            steps,
        })
    }

    #[must_use]
    pub fn problem_text(&self) -> &str {
        &self.problem_text
    }

    #[must_use]
    pub fn final_answer(&self) -> f64 {
        self.final_answer
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}
