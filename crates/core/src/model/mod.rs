mod ai_settings;
mod answer;
mod difficulty;
mod history;
mod problem;
mod progress;
mod score;

pub use ai_settings::{
    AiSettings, AiSettingsDraft, AiSettingsError, DEFAULT_BASE_URL, DEFAULT_FEEDBACK_MODEL,
    DEFAULT_PROBLEM_MODEL, DEFAULT_TIMEOUT_SECS,
};
pub use answer::{ANSWER_TOLERANCE, AnswerError, answers_match, parse_answer};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use history::{HistoryEntry, HistoryId};
pub use problem::{MathProblem, ProblemError};
pub use progress::{ProgressSnapshot, SessionProgress};
pub use score::{ScoreStats, ScoreStatsError, TierStats, accuracy_percent};
