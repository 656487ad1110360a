use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Difficulty;

/// Identifier of a history entry, derived from the submission time.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(String);

impl HistoryId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for a submission made at `at`, as epoch milliseconds.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Same id with a `-n` disambiguation suffix.
    #[must_use]
    pub fn with_suffix(&self, n: u32) -> Self {
        Self(format!("{}-{n}", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HistoryId({})", self.0)
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record of one answer submission. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: HistoryId,
    problem: String,
    user_answer: f64,
    correct_answer: f64,
    is_correct: bool,
    difficulty: Difficulty,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(
        id: HistoryId,
        problem: impl Into<String>,
        user_answer: f64,
        correct_answer: f64,
        is_correct: bool,
        difficulty: Difficulty,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            problem: problem.into(),
            user_answer,
            correct_answer,
            is_correct,
            difficulty,
            timestamp,
        }
    }

    #[must_use]
    pub fn id(&self) -> &HistoryId {
        &self.id
    }

    #[must_use]
    pub fn problem(&self) -> &str {
        &self.problem
    }

    #[must_use]
    pub fn user_answer(&self) -> f64 {
        self.user_answer
    }

    #[must_use]
    pub fn correct_answer(&self) -> f64 {
        self.correct_answer
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
