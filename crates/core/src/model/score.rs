use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Difficulty;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreStatsError {
    #[error("correct ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { total: u32, correct: u32 },

    #[error("total ({total}) does not match tier totals ({sum})")]
    TotalMismatch { total: u32, sum: u32 },

    #[error("correct ({correct}) does not match tier corrects ({sum})")]
    CorrectMismatch { correct: u32, sum: u32 },
}

/// Attempt and correct counters for a single bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStats {
    pub total: u32,
    pub correct: u32,
}

impl TierStats {
    #[must_use]
    pub fn new(total: u32, correct: u32) -> Self {
        Self { total, correct }
    }

    /// Accuracy as a whole percentage (0 when nothing was attempted).
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct, self.total)
    }

    fn record(&mut self, is_correct: bool) {
        self.total = self.total.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    fn check(&self) -> Result<(), ScoreStatsError> {
        if self.correct > self.total {
            return Err(ScoreStatsError::CorrectExceedsTotal {
                total: self.total,
                correct: self.correct,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ByDifficulty {
    easy: TierStats,
    medium: TierStats,
    hard: TierStats,
}

impl ByDifficulty {
    fn get(&self, difficulty: Difficulty) -> TierStats {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn get_mut(&mut self, difficulty: Difficulty) -> &mut TierStats {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// Aggregate accuracy counters, overall and per difficulty tier.
///
/// The overall counters always equal the sum of the tier counters, and no
/// `correct` ever exceeds its `total`. Deserialization rejects snapshots that
/// break either rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawScoreStats")]
pub struct ScoreStats {
    total: u32,
    correct: u32,
    by_difficulty: ByDifficulty,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreStats {
    total: u32,
    correct: u32,
    by_difficulty: ByDifficulty,
}

impl TryFrom<RawScoreStats> for ScoreStats {
    type Error = ScoreStatsError;

    fn try_from(raw: RawScoreStats) -> Result<Self, Self::Error> {
        Self::from_parts(
            raw.total,
            raw.correct,
            [
                raw.by_difficulty.easy,
                raw.by_difficulty.medium,
                raw.by_difficulty.hard,
            ],
        )
    }
}

impl ScoreStats {
    /// All-zero counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate counters, tiers given in `Difficulty::ALL` order.
    ///
    /// # Errors
    ///
    /// Returns `ScoreStatsError` if the overall counters disagree with the tiers
    /// or any `correct` exceeds its `total`.
    pub fn from_parts(
        total: u32,
        correct: u32,
        tiers: [TierStats; 3],
    ) -> Result<Self, ScoreStatsError> {
        let [easy, medium, hard] = tiers;
        for tier in &tiers {
            tier.check()?;
        }
        TierStats::new(total, correct).check()?;

        let total_sum = tiers.iter().fold(0_u32, |acc, t| acc.saturating_add(t.total));
        if total_sum != total {
            return Err(ScoreStatsError::TotalMismatch {
                total,
                sum: total_sum,
            });
        }
        let correct_sum = tiers
            .iter()
            .fold(0_u32, |acc, t| acc.saturating_add(t.correct));
        if correct_sum != correct {
            return Err(ScoreStatsError::CorrectMismatch {
                correct,
                sum: correct_sum,
            });
        }

        Ok(Self {
            total,
            correct,
            by_difficulty: ByDifficulty { easy, medium, hard },
        })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn tier(&self, difficulty: Difficulty) -> TierStats {
        self.by_difficulty.get(difficulty)
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct, self.total)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count one submission in both the overall and the tier counters.
    pub(crate) fn record(&mut self, difficulty: Difficulty, is_correct: bool) {
        let mut overall = TierStats::new(self.total, self.correct);
        overall.record(is_correct);
        self.total = overall.total;
        self.correct = overall.correct;
        self.by_difficulty.get_mut(difficulty).record(is_correct);
    }
}

/// Rounded percentage of `correct` over `total`; 0 when `total` is 0.
#[must_use]
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let ratio = f64::from(correct) / f64::from(total) * 100.0;
    // ratio is within 0..=100 for valid counters
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = ratio.round() as u32;
    rounded
}
