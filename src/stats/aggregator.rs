use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{OutcomeKind, PlayerOutcome, PlayerProfile, StatBlock, StatValue};

pub const NOT_APPLICABLE: &str = "N/A";
pub const SUCCESSFUL_SUBMISSIONS: &str = "successful submissions";

/// Per-report rates, recomputed from the summed totals
const RECOMPUTED_KEYS: [&str; 4] = [
    "accuracy",
    "strike defense rate",
    "takedown accuracy",
    "takedown defense rate",
];

/// One aggregated stat: a number, or "N/A" when its denominator is missing or zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateValue {
    Number(StatValue),
    NotApplicable,
}

impl fmt::Display for AggregateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateValue::Number(value) => write!(f, "{}", value),
            AggregateValue::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for AggregateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AggregateValue::Number(value) => value.serialize(serializer),
            AggregateValue::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

/// Win/loss/draw tally; undocumented matches count towards none of them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLossDraw {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl WinLossDraw {
    pub fn record(&mut self, outcome: PlayerOutcome) {
        match outcome {
            PlayerOutcome::Win => self.wins += 1,
            PlayerOutcome::Loss => self.losses += 1,
            PlayerOutcome::Draw => self.draws += 1,
            PlayerOutcome::Undocumented => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl fmt::Display for WinLossDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.draws)
    }
}

/// Career (or single event) summary of one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub matches: usize,
    pub stats: BTreeMap<String, AggregateValue>,
    pub record: WinLossDraw,
}

/// Tally wins, losses and draws of `profile`, optionally within one event
pub fn win_loss_draw(profile: &PlayerProfile, event: Option<&str>) -> WinLossDraw {
    let mut tally = WinLossDraw::default();
    for record in profile.matches_in(event) {
        if let Some(outcome) = record.outcome_for(profile.name()) {
            tally.record(outcome);
        }
    }
    tally
}

/// Fold a player's matches into summed raw stats and recomputed rates
pub fn aggregate(profile: &PlayerProfile, event: Option<&str>) -> PlayerSummary {
    let matches = profile.matches_in(event);

    let mut totals = StatBlock::new();
    totals.insert(SUCCESSFUL_SUBMISSIONS.to_string(), StatValue::Int(0));
    let mut record = WinLossDraw::default();

    for m in &matches {
        let Some(block) = m.stats_for(profile.name()) else {
            continue;
        };
        accumulate(&mut totals, block);

        if m.outcome_kind == OutcomeKind::Submission {
            let submissions = totals.entry(SUCCESSFUL_SUBMISSIONS.to_string()).or_insert(StatValue::Int(0));
            *submissions = *submissions + StatValue::Int(1);
        }
        if let Some(outcome) = m.outcome_for(profile.name()) {
            record.record(outcome);
        }
    }

    let mut stats: BTreeMap<String, AggregateValue> = totals
        .iter()
        .map(|(key, value)| (key.clone(), AggregateValue::Number(*value)))
        .collect();
    stats.extend(derived_rates(&totals));

    PlayerSummary {
        name: profile.name().to_string(),
        matches: matches.len(),
        stats,
        record,
    }
}

fn accumulate(totals: &mut StatBlock, block: &StatBlock) {
    for (key, value) in block {
        if RECOMPUTED_KEYS.contains(&key.as_str()) {
            continue;
        }
        totals
            .entry(key.clone())
            .and_modify(|total| *total = *total + *value)
            .or_insert(*value);
    }
}

fn derived_rates(totals: &StatBlock) -> Vec<(String, AggregateValue)> {
    let get = |key: &str| totals.get(key).map(StatValue::as_f64);

    let defended = get("takedowns defended");
    let taken_down = get("times taken down");
    let takedown_chances = defended.zip(taken_down).map(|(d, t)| d + t);

    let mut rates = vec![
        ("accuracy", percentage(get("strikes landed"), get("strikes thrown"))),
        ("takedown accuracy", percentage(get("takedowns finished"), get("takedowns attempted"))),
        ("takedown defense rate", percentage(defended, takedown_chances)),
    ];
    // Older eras never tracked strikes defended
    if totals.contains_key("strikes defended") {
        rates.push(("strike defense rate", percentage(get("strikes defended"), get("strikes absorbed"))));
    }

    rates
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn percentage(numerator: Option<f64>, denominator: Option<f64>) -> AggregateValue {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => AggregateValue::Number(StatValue::Float(n / d * 100.0)),
        _ => AggregateValue::NotApplicable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormatEra, MatchRecord};
    use std::sync::Arc;

    fn block(entries: &[(&str, StatValue)]) -> StatBlock {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn fight(
        event: &str,
        alice: StatBlock,
        winner: Option<&str>,
        outcome_kind: OutcomeKind,
    ) -> Arc<MatchRecord> {
        let mut stats = BTreeMap::new();
        stats.insert("alice".to_string(), alice);
        stats.insert("bob".to_string(), StatBlock::new());
        Arc::new(MatchRecord {
            event_name: event.to_string(),
            name: "Alice_vs_Bob".to_string(),
            player1_name: "alice".to_string(),
            player2_name: "bob".to_string(),
            stats,
            winner_name: winner.map(str::to_string),
            outcome_kind,
            format_era: FormatEra::Unknown,
            meta_lines: Vec::new(),
            records: Vec::new(),
            result_lines: Vec::new(),
        })
    }

    fn profile_of(matches: Vec<Arc<MatchRecord>>) -> PlayerProfile {
        let mut profile = PlayerProfile::new("Alice");
        for m in matches {
            profile.add_match(m);
        }
        profile
    }

    #[test]
    fn test_sums_raw_stats_and_recomputes_accuracy() {
        let profile = profile_of(vec![
            fight(
                "TFC_1",
                block(&[
                    ("strikes landed", StatValue::Int(10)),
                    ("strikes thrown", StatValue::Int(20)),
                    ("accuracy", StatValue::Float(50.0)),
                ]),
                Some("alice"),
                OutcomeKind::Decision,
            ),
            fight(
                "TFC_2",
                block(&[
                    ("strikes landed", StatValue::Int(5)),
                    ("strikes thrown", StatValue::Int(20)),
                    ("accuracy", StatValue::Float(25.0)),
                ]),
                Some("bob"),
                OutcomeKind::Tko,
            ),
        ]);

        let summary = aggregate(&profile, None);

        assert_eq!(summary.stats["strikes landed"], AggregateValue::Number(StatValue::Int(15)));
        assert_eq!(summary.stats["strikes thrown"], AggregateValue::Number(StatValue::Int(40)));
        assert_eq!(summary.stats["accuracy"], AggregateValue::Number(StatValue::Float(37.5)));
        assert_eq!(summary.record, WinLossDraw { wins: 1, losses: 1, draws: 0 });
    }

    #[test]
    fn test_huge_career_totals_do_not_overflow() {
        let huge = || block(&[("strikes landed", StatValue::Int(i64::MAX))]);
        let profile = profile_of(vec![
            fight("TFC_1", huge(), Some("alice"), OutcomeKind::Decision),
            fight("TFC_2", huge(), Some("alice"), OutcomeKind::Decision),
        ]);

        let summary = aggregate(&profile, None);

        assert_eq!(
            summary.stats["strikes landed"],
            AggregateValue::Number(StatValue::Float(i64::MAX as f64 * 2.0))
        );
    }

    #[test]
    fn test_zero_denominator_is_not_applicable() {
        let profile = profile_of(vec![fight(
            "TFC_1",
            block(&[
                ("strikes landed", StatValue::Int(0)),
                ("strikes thrown", StatValue::Int(0)),
                ("takedowns defended", StatValue::Int(0)),
                ("times taken down", StatValue::Int(0)),
            ]),
            None,
            OutcomeKind::Draw,
        )]);

        let summary = aggregate(&profile, None);

        assert_eq!(summary.stats["accuracy"], AggregateValue::NotApplicable);
        assert_eq!(summary.stats["takedown defense rate"], AggregateValue::NotApplicable);
        assert_eq!(summary.stats["takedown accuracy"], AggregateValue::NotApplicable);
        assert_eq!(summary.stats["accuracy"].to_string(), "N/A");
    }

    #[test]
    fn test_strike_defense_rate_only_when_tracked() {
        let legacy = profile_of(vec![fight(
            "TFC_1",
            block(&[("strikes absorbed", StatValue::Int(8))]),
            None,
            OutcomeKind::Draw,
        )]);
        assert!(!aggregate(&legacy, None).stats.contains_key("strike defense rate"));

        let modern = profile_of(vec![fight(
            "TFC_9",
            block(&[
                ("strikes absorbed", StatValue::Int(8)),
                ("strikes defended", StatValue::Int(2)),
            ]),
            None,
            OutcomeKind::Draw,
        )]);
        assert_eq!(
            aggregate(&modern, None).stats["strike defense rate"],
            AggregateValue::Number(StatValue::Float(25.0))
        );
    }

    #[test]
    fn test_successful_submissions_counted_from_outcome() {
        let profile = profile_of(vec![
            fight("TFC_1", StatBlock::new(), Some("alice"), OutcomeKind::Submission),
            fight("TFC_2", StatBlock::new(), Some("bob"), OutcomeKind::Submission),
            fight("TFC_3", StatBlock::new(), Some("alice"), OutcomeKind::Tko),
        ]);

        let summary = aggregate(&profile, None);
        assert_eq!(
            summary.stats[SUCCESSFUL_SUBMISSIONS],
            AggregateValue::Number(StatValue::Int(2))
        );
    }

    #[test]
    fn test_tally_never_exceeds_match_count() {
        let profile = profile_of(vec![
            fight("TFC_1", StatBlock::new(), Some("alice"), OutcomeKind::Decision),
            fight("TFC_2", StatBlock::new(), None, OutcomeKind::Draw),
            fight("TFC_3", StatBlock::new(), None, OutcomeKind::Undocumented),
        ]);

        let summary = aggregate(&profile, None);
        assert_eq!(summary.record, WinLossDraw { wins: 1, losses: 0, draws: 1 });
        assert!(summary.record.total() as usize <= summary.matches);
        assert_eq!(summary.matches, 3);
        assert_eq!(win_loss_draw(&profile, None), summary.record);
    }

    #[test]
    fn test_event_filter() {
        let profile = profile_of(vec![
            fight("TFC_1", block(&[("knockdowns", StatValue::Int(2))]), Some("alice"), OutcomeKind::Tko),
            fight("TFC_2", block(&[("knockdowns", StatValue::Int(1))]), Some("bob"), OutcomeKind::Tko),
        ]);

        let summary = aggregate(&profile, Some("TFC_2"));
        assert_eq!(summary.matches, 1);
        assert_eq!(summary.stats["knockdowns"], AggregateValue::Number(StatValue::Int(1)));
        assert_eq!(summary.record.losses, 1);
    }

    #[test]
    fn test_serializes_not_applicable_as_string() {
        let json = serde_json::to_string(&AggregateValue::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        let json = serde_json::to_string(&AggregateValue::Number(StatValue::Int(3))).unwrap();
        assert_eq!(json, "3");
    }
}
