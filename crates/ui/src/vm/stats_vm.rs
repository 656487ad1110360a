use mathgen_core::model::{Difficulty, ScoreStats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierRowVm {
    pub label: &'static str,
    pub class: &'static str,
    pub correct: u32,
    pub total: u32,
    pub accuracy: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub total: u32,
    pub correct: u32,
    pub accuracy: u32,
    pub tiers: Vec<TierRowVm>,
}

impl StatsVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[must_use]
pub fn map_stats(scores: &ScoreStats) -> StatsVm {
    let tiers = Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            let tier = scores.tier(difficulty);
            TierRowVm {
                label: difficulty.label(),
                class: difficulty.as_str(),
                correct: tier.correct,
                total: tier.total,
                accuracy: tier.accuracy(),
            }
        })
        .collect();

    StatsVm {
        total: scores.total(),
        correct: scores.correct(),
        accuracy: scores.accuracy(),
        tiers,
    }
}
