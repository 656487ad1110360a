//! Shared error types for the services crate.

use thiserror::Error;

use mathgen_core::model::{AiSettingsError, AnswerError, ProblemError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by a `TextGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("text generation is not configured")]
    Disabled,
    #[error("text generation returned an empty response")]
    EmptyResponse,
    #[error("text generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors decoding a problem reply into a `MathProblem`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("reply is empty")]
    Empty,
    #[error("reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reply is missing `{0}`")]
    MissingField(&'static str),
    #[error("final answer is not numeric: {0}")]
    NonNumericAnswer(String),
    #[error(transparent)]
    Invalid(#[from] ProblemError),
}

/// Errors from a "generate problem" round trip.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProblemRequestError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ProblemRequestError {
    /// Text shown next to the retry affordance.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Failed to generate problem. Please try again."
    }
}

/// Submissions rejected before any network call or state change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("answer already submitted for this problem")]
    Duplicate,
    #[error(transparent)]
    InvalidAnswer(#[from] AnswerError),
}

impl SubmitError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Duplicate => {
                "You have already submitted this answer. Please try a different answer or generate a new problem."
            }
            SubmitError::InvalidAnswer(_) => "Please enter a valid number.",
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Settings(#[from] AiSettingsError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
