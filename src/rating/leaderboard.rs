use std::cmp::Ordering;
use std::fmt;

use super::engine::RatingTable;
use super::types::Rating;
use crate::history::HistoryStore;
use crate::stats::{recent_activity, win_loss_draw, Activity, WinLossDraw};

/// One leaderboard line
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub record: WinLossDraw,
    /// None for players whose matches were all outside the rated events
    pub rating: Option<Rating>,
    /// Present only when a recent-event window was given
    pub activity: Option<Activity>,
}

impl Standing {
    pub fn is_active(&self) -> bool {
        self.activity.as_ref().is_some_and(|activity| activity.active)
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: <{}>", self.name, self.record)?;
        if let Some(activity) = self.activity.as_ref().filter(|activity| activity.active) {
            write!(f, " {}", activity)?;
        }
        if let Some(rating) = &self.rating {
            write!(f, " {:.1}, ({})", rating.conservative(), rating)?;
        }
        Ok(())
    }
}

/// Players ranked by conservative estimate; unrated players follow by name
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub recent_events: Vec<String>,
    pub standings: Vec<Standing>,
}

impl Leaderboard {
    pub fn build(store: &HistoryStore, table: &RatingTable, recent_events: &[String]) -> Self {
        let mut standings: Vec<Standing> = store
            .players()
            .map(|profile| Standing {
                name: profile.name().to_string(),
                record: win_loss_draw(profile, None),
                rating: table.get(profile.name()).copied(),
                activity: (!recent_events.is_empty()).then(|| recent_activity(profile, recent_events)),
            })
            .collect();
        standings.sort_by(compare_standings);

        Self {
            recent_events: recent_events.to_vec(),
            standings,
        }
    }

    pub fn has_activity_split(&self) -> bool {
        !self.recent_events.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &Standing> {
        self.standings.iter().filter(|s| s.is_active())
    }

    pub fn inactive(&self) -> impl Iterator<Item = &Standing> {
        self.standings.iter().filter(|s| !s.is_active())
    }
}

/// Ratings ordered by `mu - 3 sigma`, highest first, ties by name
pub fn rank(table: &RatingTable) -> Vec<(&str, Rating)> {
    let mut ranked: Vec<(&str, Rating)> = table
        .ratings()
        .iter()
        .map(|(name, rating)| (name.as_str(), *rating))
        .collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| {
        b.conservative()
            .total_cmp(&a.conservative())
            .then_with(|| a_name.cmp(b_name))
    });
    ranked
}

fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    let by_rating = match (&a.rating, &b.rating) {
        (Some(ra), Some(rb)) => rb.conservative().total_cmp(&ra.conservative()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_rating.then_with(|| a.name.cmp(&b.name))
}
