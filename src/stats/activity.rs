use std::fmt;

use crate::domain::{EventKey, PlayerProfile};

/// Mark for a recent event the player did not fight in
pub const ABSENT_MARK: &str = "x";

/// Recent form of one player over a window of events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// One mark per recent event, oldest first
    pub marks: Vec<&'static str>,
    pub active: bool,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.marks.join("-"))
    }
}

/// Streak over `recent_events` (in any order; they are sorted chronologically)
///
/// Only the first match a player has in an event counts.
pub fn recent_activity(profile: &PlayerProfile, recent_events: &[String]) -> Activity {
    let mut events: Vec<&String> = recent_events.iter().collect();
    events.sort_by_cached_key(|event| EventKey::new(event));

    let marks: Vec<&'static str> = events
        .into_iter()
        .map(|event| {
            profile
                .matches_in(Some(event.as_str()))
                .first()
                .and_then(|record| record.outcome_for(profile.name()))
                .map_or(ABSENT_MARK, |outcome| outcome.as_mark())
        })
        .collect();

    let active = marks.iter().any(|mark| *mark != ABSENT_MARK);
    Activity { marks, active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormatEra, MatchRecord, OutcomeKind};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn fight(event: &str, winner: Option<&str>, outcome_kind: OutcomeKind) -> Arc<MatchRecord> {
        Arc::new(MatchRecord {
            event_name: event.to_string(),
            name: "Alice_vs_Bob".to_string(),
            player1_name: "alice".to_string(),
            player2_name: "bob".to_string(),
            stats: BTreeMap::new(),
            winner_name: winner.map(str::to_string),
            outcome_kind,
            format_era: FormatEra::Unknown,
            meta_lines: Vec::new(),
            records: Vec::new(),
            result_lines: Vec::new(),
        })
    }

    fn events(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_marks_follow_event_order() {
        let mut profile = PlayerProfile::new("alice");
        profile.add_match(fight("TFC_20", Some("alice"), OutcomeKind::Tko));
        profile.add_match(fight("TFC_22", None, OutcomeKind::Draw));

        let activity = recent_activity(&profile, &events(&["TFC_22", "TFC_21", "TFC_20"]));

        assert_eq!(activity.marks, vec!["w", "x", "d"]);
        assert!(activity.active);
        assert_eq!(activity.to_string(), "[w-x-d]");
    }

    #[test]
    fn test_only_first_match_of_event_counts() {
        let mut profile = PlayerProfile::new("alice");
        profile.add_match(fight("TFC_5", None, OutcomeKind::Undocumented));
        profile.add_match(fight("TFC_5", Some("alice"), OutcomeKind::Decision));

        let activity = recent_activity(&profile, &events(&["TFC_5"]));
        assert_eq!(activity.marks, vec!["?"]);
    }

    #[test]
    fn test_inactive_player() {
        let mut profile = PlayerProfile::new("bob");
        profile.add_match(fight("TFC_1", Some("alice"), OutcomeKind::Submission));

        let activity = recent_activity(&profile, &events(&["TFC_21", "TFC_22"]));
        assert_eq!(activity.marks, vec!["x", "x"]);
        assert!(!activity.active);
    }
}
