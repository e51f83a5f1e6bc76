use std::fmt;

use crate::domain::{OutcomeKind, PlayerOutcome, PlayerProfile};

/// One fight in a player's match history
#[derive(Debug, Clone, PartialEq)]
pub struct MatchLine {
    pub outcome: PlayerOutcome,
    pub kind: OutcomeKind,
    pub event_name: String,
    pub match_name: String,
}

impl fmt::Display for MatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} in {} ({})",
            self.outcome.as_mark().to_uppercase(),
            self.kind,
            self.event_name,
            self.match_name
        )
    }
}

/// Every fight of `profile` in event order, undocumented ones included
pub fn match_history(profile: &PlayerProfile, event: Option<&str>) -> Vec<MatchLine> {
    profile
        .chronological()
        .into_iter()
        .filter(|m| event.is_none_or(|event| m.event_name == event))
        .filter_map(|m| {
            let outcome = m.outcome_for(profile.name())?;
            Some(MatchLine {
                outcome,
                kind: m.outcome_kind,
                event_name: m.event_name.clone(),
                match_name: m.name.clone(),
            })
        })
        .collect()
}
