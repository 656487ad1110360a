mod session;
mod state;
mod view;

pub use session::SolveSession;
pub use state::{Banner, Pending, SolveAction, SolveState};
pub use view::SolveView;
