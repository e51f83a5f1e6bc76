use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::types::{Rating, RatingStep, SkillUpdate};
use crate::domain::{EventKey, MatchRecord, OutcomeKind};
use crate::errors::RatingError;

/// Final ratings of a replay plus every player's trajectory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTable {
    ratings: BTreeMap<String, Rating>,
    trajectories: BTreeMap<String, Vec<RatingStep>>,
    rated_matches: usize,
    skipped_matches: usize,
}

impl RatingTable {
    pub fn get(&self, player: &str) -> Option<&Rating> {
        self.ratings.get(&player.to_lowercase())
    }

    pub fn ratings(&self) -> &BTreeMap<String, Rating> {
        &self.ratings
    }

    pub fn trajectory(&self, player: &str) -> &[RatingStep] {
        self.trajectories
            .get(&player.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn rated_matches(&self) -> usize {
        self.rated_matches
    }

    /// Matches replayed without an update (undocumented results)
    pub fn skipped_matches(&self) -> usize {
        self.skipped_matches
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    fn current(&mut self, player: &str, initial: Rating) -> Rating {
        *self.ratings.entry(player.to_string()).or_insert(initial)
    }
}

/// Replays matches in event order through a pairwise update
pub struct RatingEngine<U: SkillUpdate> {
    updater: U,
    rated_events: Option<BTreeSet<String>>,
}

impl<U: SkillUpdate> RatingEngine<U> {
    pub fn new(updater: U) -> Self {
        Self {
            updater,
            rated_events: None,
        }
    }

    /// Rate only matches from these events; an empty list rates everything
    pub fn with_event_filter<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let events: BTreeSet<String> = events.into_iter().collect();
        self.rated_events = (!events.is_empty()).then_some(events);
        self
    }

    /// Replay `matches` ordered by event; ties keep their slice order
    pub fn replay(&self, matches: &[Arc<MatchRecord>]) -> Result<RatingTable, RatingError> {
        let mut ordered: Vec<&Arc<MatchRecord>> = matches
            .iter()
            .filter(|record| self.is_rated_event(&record.event_name))
            .collect();
        ordered.sort_by_cached_key(|record| EventKey::new(&record.event_name));

        info!("  → Replaying {} of {} matches", ordered.len(), matches.len());

        let mut table = RatingTable::default();
        for record in ordered {
            self.apply(&mut table, record)?;
        }

        info!(
            "  → Rated {} matches for {} players ({} undocumented)",
            table.rated_matches,
            table.ratings.len(),
            table.skipped_matches
        );
        Ok(table)
    }

    fn is_rated_event(&self, event_name: &str) -> bool {
        self.rated_events
            .as_ref()
            .is_none_or(|events| events.contains(event_name))
    }

    fn apply(&self, table: &mut RatingTable, record: &MatchRecord) -> Result<(), RatingError> {
        check_winner(record)?;

        let [player1, player2] = record.participants();
        let initial = self.updater.initial_rating();
        let before1 = table.current(player1, initial);
        let before2 = table.current(player2, initial);

        let (after1, after2) = match (&record.winner_name, record.outcome_kind) {
            (_, OutcomeKind::Undocumented) => {
                debug!("Skipping undocumented match {}/{}", record.event_name, record.name);
                table.skipped_matches += 1;
                return Ok(());
            }
            (None, _) => self.updater.rate_1v1(before1, before2, true),
            (Some(winner), _) if winner == player1 => self.updater.rate_1v1(before1, before2, false),
            (Some(_), _) => {
                let (after2, after1) = self.updater.rate_1v1(before2, before1, false);
                (after1, after2)
            }
        };

        table.ratings.insert(player1.to_string(), after1);
        table.ratings.insert(player2.to_string(), after2);
        table.rated_matches += 1;

        push_step(table, record, player1, player2, (before1, before2), after1);
        push_step(table, record, player2, player1, (before2, before1), after2);
        Ok(())
    }
}

/// A winner outside the fight, a winner on a draw, or a decisive result without one is corrupt data
fn check_winner(record: &MatchRecord) -> Result<(), RatingError> {
    if record.satisfies_outcome_invariant() {
        return Ok(());
    }

    let player1 = record.player1_name.clone();
    let player2 = record.player2_name.clone();
    let event = record.event_name.clone();
    let err = match &record.winner_name {
        Some(winner) if record.has_participant(winner) => RatingError::WinnerInDraw {
            winner: winner.clone(),
            player1,
            player2,
            event,
        },
        Some(winner) => RatingError::WinnerNotParticipant {
            winner: winner.clone(),
            player1,
            player2,
            event,
        },
        None => RatingError::MissingWinner {
            player1,
            player2,
            event,
            outcome: record.outcome_kind.to_string(),
        },
    };
    Err(err)
}

fn push_step(
    table: &mut RatingTable,
    record: &MatchRecord,
    player: &str,
    opponent: &str,
    (before, opponent_before): (Rating, Rating),
    after: Rating,
) {
    let Some(outcome) = record.outcome_for(player) else {
        return;
    };

    table
        .trajectories
        .entry(player.to_string())
        .or_default()
        .push(RatingStep {
            event_name: record.event_name.clone(),
            match_name: record.name.clone(),
            opponent: opponent.to_string(),
            before,
            opponent_before,
            outcome,
            after,
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormatEra, PlayerOutcome};
    use crate::rating::TrueSkill;

    fn fight(event: &str, p1: &str, p2: &str, winner: Option<&str>, kind: OutcomeKind) -> Arc<MatchRecord> {
        Arc::new(MatchRecord {
            event_name: event.to_string(),
            name: format!("{}_vs_{}", p1, p2),
            player1_name: p1.to_string(),
            player2_name: p2.to_string(),
            stats: BTreeMap::new(),
            winner_name: winner.map(str::to_string),
            outcome_kind: kind,
            format_era: FormatEra::Unknown,
            meta_lines: Vec::new(),
            records: Vec::new(),
            result_lines: Vec::new(),
        })
    }

    fn engine() -> RatingEngine<TrueSkill> {
        RatingEngine::new(TrueSkill::default())
    }

    #[test]
    fn test_trajectory_follows_event_order() {
        let matches = vec![
            fight("TFC_3", "x", "c", None, OutcomeKind::Draw),
            fight("TFC_1", "x", "a", Some("x"), OutcomeKind::Decision),
            fight("TFC_2", "b", "x", Some("b"), OutcomeKind::Tko),
        ];

        let table = engine().replay(&matches).unwrap();
        let steps = table.trajectory("X");

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].event_name, "TFC_1");
        assert_eq!(steps[0].outcome, PlayerOutcome::Win);
        assert!(steps[0].after.mu > steps[0].before.mu);
        assert_eq!(steps[1].outcome, PlayerOutcome::Loss);
        assert!(steps[1].after.mu < steps[1].before.mu);
        assert_eq!(steps[2].outcome, PlayerOutcome::Draw);
        assert_eq!(steps[1].before, steps[0].after);
        assert_eq!(table.get("x"), Some(&steps[2].after));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let matches = vec![
            fight("TFC_1", "a", "b", Some("a"), OutcomeKind::Decision),
            fight("TFC_1", "c", "d", None, OutcomeKind::Draw),
            fight("TFC_2", "a", "c", Some("c"), OutcomeKind::Submission),
            fight("TFC_10", "b", "d", Some("d"), OutcomeKind::Forfeit),
            fight("TFC_2", "b", "c", Some("b"), OutcomeKind::Tko),
        ];

        let first = engine().replay(&matches).unwrap();
        let second = engine().replay(&matches).unwrap();

        assert_eq!(first, second);
        for (name, rating) in first.ratings() {
            let again = second.get(name).unwrap();
            assert_eq!(rating.mu.to_bits(), again.mu.to_bits());
            assert_eq!(rating.sigma.to_bits(), again.sigma.to_bits());
        }
    }

    #[test]
    fn test_events_sort_numerically_and_ties_keep_order() {
        let matches = vec![
            fight("TFC_10", "a", "b", Some("b"), OutcomeKind::Decision),
            fight("TFC_2", "a", "b", Some("a"), OutcomeKind::Decision),
            fight("TFC_2", "a", "b", Some("b"), OutcomeKind::Decision),
        ];

        let table = engine().replay(&matches).unwrap();
        let events: Vec<(&str, PlayerOutcome)> = table
            .trajectory("a")
            .iter()
            .map(|step| (step.event_name.as_str(), step.outcome))
            .collect();

        assert_eq!(
            events,
            vec![
                ("TFC_2", PlayerOutcome::Win),
                ("TFC_2", PlayerOutcome::Loss),
                ("TFC_10", PlayerOutcome::Loss),
            ]
        );
    }

    #[test]
    fn test_undocumented_matches_are_skipped() {
        let matches = vec![fight("TFC_1", "a", "b", None, OutcomeKind::Undocumented)];

        let table = engine().replay(&matches).unwrap();

        assert_eq!(table.rated_matches(), 0);
        assert_eq!(table.skipped_matches(), 1);
        assert_eq!(table.get("a"), Some(&TrueSkill::default().initial_rating()));
        assert!(table.trajectory("a").is_empty());
    }

    #[test]
    fn test_winner_outside_match_aborts_replay() {
        let matches = vec![
            fight("TFC_1", "a", "b", Some("a"), OutcomeKind::Decision),
            fight("TFC_2", "a", "b", Some("carol"), OutcomeKind::Tko),
        ];

        let err = engine().replay(&matches).unwrap_err();
        assert!(matches!(err, RatingError::WinnerNotParticipant { ref winner, .. } if winner == "carol"));

        let decisive_without_winner = vec![fight("TFC_1", "a", "b", None, OutcomeKind::Tko)];
        assert!(matches!(
            engine().replay(&decisive_without_winner),
            Err(RatingError::MissingWinner { .. })
        ));
    }

    #[test]
    fn test_draw_with_declared_winner_aborts_replay() {
        let matches = vec![fight("TFC_1", "alice", "bob", Some("alice"), OutcomeKind::Draw)];

        let err = engine().replay(&matches).unwrap_err();

        assert!(matches!(err, RatingError::WinnerInDraw { ref winner, .. } if winner == "alice"));
    }

    #[test]
    fn test_event_filter_leaves_other_players_unrated() {
        let matches = vec![
            fight("TFC_1", "a", "b", Some("a"), OutcomeKind::Decision),
            fight("TFC_2", "c", "d", Some("c"), OutcomeKind::Decision),
        ];

        let table = engine()
            .with_event_filter(vec!["TFC_2".to_string()])
            .replay(&matches)
            .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.get("a").is_none());
        assert!(table.get("c").is_some());
    }
}
