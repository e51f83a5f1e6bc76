pub mod engine;
mod gaussian;
pub mod leaderboard;
pub mod trueskill;
pub mod types;

pub use engine::{RatingEngine, RatingTable};
pub use leaderboard::{rank, Leaderboard, Standing};
pub use trueskill::TrueSkill;
pub use types::{Rating, RatingStep, SkillUpdate};
