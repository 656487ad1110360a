use chrono::{DateTime, Utc};

use crate::model::{Difficulty, HistoryEntry, HistoryId, ScoreStats};

/// Complete progress state, as handed to persistence after each mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub history: Vec<HistoryEntry>,
    pub scores: ScoreStats,
}

/// In-memory owner of the submission history and the accuracy counters.
///
/// History is kept newest first. Every mutation updates history and scores
/// together, so the counters always describe the recorded submissions since
/// the last reset or load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionProgress {
    history: Vec<HistoryEntry>,
    scores: ScoreStats,
}

impl SessionProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn scores(&self) -> ScoreStats {
        self.scores
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            history: self.history.clone(),
            scores: self.scores,
        }
    }

    /// Record one answer submission and return the new history entry.
    pub fn record_submission(
        &mut self,
        problem_text: &str,
        user_answer: f64,
        correct_answer: f64,
        difficulty: Difficulty,
        is_correct: bool,
        at: DateTime<Utc>,
    ) -> HistoryEntry {
        let entry = HistoryEntry::new(
            self.next_id(at),
            problem_text,
            user_answer,
            correct_answer,
            is_correct,
            difficulty,
            at,
        );
        self.history.insert(0, entry.clone());
        self.scores.record(difficulty, is_correct);
        entry
    }

    /// Drop all history and zero every counter.
    pub fn reset(&mut self) {
        self.history.clear();
        self.scores = ScoreStats::new();
    }

    /// Replace state from persisted snapshots. Absent parts keep their current value.
    pub fn load(&mut self, history: Option<Vec<HistoryEntry>>, scores: Option<ScoreStats>) {
        if let Some(history) = history {
            self.history = history;
        }
        if let Some(scores) = scores {
            self.scores = scores;
        }
    }

    fn next_id(&self, at: DateTime<Utc>) -> HistoryId {
        let base = HistoryId::from_timestamp(at);
        let taken = |id: &HistoryId| self.history.iter().any(|entry| entry.id() == id);
        if !taken(&base) {
            return base;
        }
        let mut n = 1_u32;
        loop {
            let candidate = base.with_suffix(n);
            if !taken(&candidate) {
                return candidate;
            }
            n = n.saturating_add(1);
        }
    }
}
