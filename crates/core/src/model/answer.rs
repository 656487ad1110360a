use thiserror::Error;

/// Absolute tolerance under which a submitted answer counts as correct.
pub const ANSWER_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("answer is empty")]
    Empty,
    #[error("answer is not a number: {0}")]
    NotANumber(String),
}

/// Returns true when `user` is within `ANSWER_TOLERANCE` of `correct`.
#[must_use]
pub fn answers_match(user: f64, correct: f64) -> bool {
    (user - correct).abs() < ANSWER_TOLERANCE
}

/// Parse the literal typed into the answer box.
///
/// # Errors
///
/// Returns `AnswerError::Empty` for blank input and `AnswerError::NotANumber`
/// for anything that is not a finite decimal number.
pub fn parse_answer(raw: &str) -> Result<f64, AnswerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnswerError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnswerError::NotANumber(trimmed.to_string())),
    }
}
