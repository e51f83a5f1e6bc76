pub mod activity;
pub mod aggregator;
pub mod matches;

pub use activity::{recent_activity, Activity};
pub use aggregator::{aggregate, win_loss_draw, AggregateValue, PlayerSummary, WinLossDraw};
pub use matches::{match_history, MatchLine};
