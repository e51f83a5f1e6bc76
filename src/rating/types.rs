use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::PlayerOutcome;

/// Skill estimate of one player: mean and uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Lower confidence bound `mu - 3 sigma`, used for ranking
    pub fn conservative(&self) -> f64 {
        self.mu - 3.0 * self.sigma
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}±{:.1}", self.mu, self.sigma)
    }
}

/// Pairwise rating update, isolated from the replay order
pub trait SkillUpdate {
    /// Rating of a player never seen before
    fn initial_rating(&self) -> Rating;

    /// Update after one match. With `drawn` the order of the two ratings carries no meaning.
    fn rate_1v1(&self, winner: Rating, loser: Rating, drawn: bool) -> (Rating, Rating);
}

/// One entry of a player's rating trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStep {
    pub event_name: String,
    pub match_name: String,
    pub opponent: String,
    pub before: Rating,
    pub opponent_before: Rating,
    pub outcome: PlayerOutcome,
    pub after: Rating,
}

impl RatingStep {
    pub fn delta_mu(&self) -> f64 {
        self.after.mu - self.before.mu
    }
}

impl fmt::Display for RatingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} vs {} ({}): {} -> {} ({:+.2})",
            self.event_name,
            self.outcome.as_mark(),
            self.opponent,
            self.opponent_before,
            self.before,
            self.after,
            self.delta_mu()
        )
    }
}
