mod history;
mod solve;
mod state;
mod stats;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use history::HistoryView;
pub use solve::{Banner, Pending, SolveAction, SolveSession, SolveState, SolveView};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use stats::StatsView;
