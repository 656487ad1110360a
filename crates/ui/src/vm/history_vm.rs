use mathgen_core::model::HistoryEntry;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub id: String,
    pub problem: String,
    pub difficulty_label: &'static str,
    pub difficulty_class: &'static str,
    pub submitted_at_str: String,
    pub user_answer_str: String,
    /// Only present for wrong answers.
    pub correct_answer_str: Option<String>,
    pub is_correct: bool,
}

impl From<&HistoryEntry> for HistoryRowVm {
    fn from(entry: &HistoryEntry) -> Self {
        let is_correct = entry.is_correct();
        Self {
            id: entry.id().as_str().to_string(),
            problem: entry.problem().to_string(),
            difficulty_label: entry.difficulty().label(),
            difficulty_class: entry.difficulty().as_str(),
            submitted_at_str: format_datetime(entry.timestamp()),
            user_answer_str: entry.user_answer().to_string(),
            correct_answer_str: (!is_correct).then(|| entry.correct_answer().to_string()),
            is_correct,
        }
    }
}

#[must_use]
pub fn map_history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRowVm> {
    entries.iter().map(HistoryRowVm::from).collect()
}
