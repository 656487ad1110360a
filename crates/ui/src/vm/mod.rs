mod history_vm;
mod stats_vm;
mod time_fmt;

pub use history_vm::{HistoryRowVm, map_history_rows};
pub use stats_vm::{StatsVm, TierRowVm, map_stats};
pub use time_fmt::format_datetime;
