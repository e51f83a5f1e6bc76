use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use super::era::FormatEra;
use super::outcome::OutcomeKind;

/// Stats for one player in one report, keyed by lower-cased label
pub type StatBlock = BTreeMap<String, StatValue>;

/// Raw stat value as declared in a report
///
/// Integers stay integers; only percentages and decimals are floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            StatValue::Int(v) => v as f64,
            StatValue::Float(v) => v,
        }
    }
}

impl Add for StatValue {
    type Output = StatValue;

    fn add(self, rhs: StatValue) -> StatValue {
        match (self, rhs) {
            // Integer sums past i64 widen to a float
            (StatValue::Int(a), StatValue::Int(b)) => a
                .checked_add(b)
                .map_or(StatValue::Float(a as f64 + b as f64), StatValue::Int),
            (a, b) => StatValue::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            StatValue::Float(v) => write!(f, "{:.2}", v),
        }
    }
}

/// How a match ended from one participant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOutcome {
    Win,
    Loss,
    Draw,
    Undocumented,
}

impl PlayerOutcome {
    pub fn as_mark(&self) -> &'static str {
        match self {
            PlayerOutcome::Win => "w",
            PlayerOutcome::Loss => "l",
            PlayerOutcome::Draw => "d",
            PlayerOutcome::Undocumented => "?",
        }
    }
}

/// One match between two players, as extracted from a single report
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub event_name: String,
    /// Original file stem, e.g. `Alice_vs_Bob 2`
    pub name: String,
    pub player1_name: String,
    pub player2_name: String,
    pub stats: BTreeMap<String, StatBlock>,
    pub winner_name: Option<String>,
    pub outcome_kind: OutcomeKind,
    pub format_era: FormatEra,
    pub meta_lines: Vec<String>,
    pub records: Vec<String>,
    pub result_lines: Vec<String>,
}

impl MatchRecord {
    pub fn participants(&self) -> [&str; 2] {
        [&self.player1_name, &self.player2_name]
    }

    pub fn has_participant(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.player1_name == name || self.player2_name == name
    }

    pub fn opponent_of(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        if self.player1_name == name {
            Some(&self.player2_name)
        } else if self.player2_name == name {
            Some(&self.player1_name)
        } else {
            None
        }
    }

    pub fn stats_for(&self, name: &str) -> Option<&StatBlock> {
        self.stats.get(&name.to_lowercase())
    }

    /// Result of this match for `name`, or None if they did not fight in it
    pub fn outcome_for(&self, name: &str) -> Option<PlayerOutcome> {
        if !self.has_participant(name) {
            return None;
        }

        let outcome = match &self.winner_name {
            Some(winner) if *winner == name.to_lowercase() => PlayerOutcome::Win,
            Some(_) => PlayerOutcome::Loss,
            None if self.outcome_kind == OutcomeKind::Draw => PlayerOutcome::Draw,
            None => PlayerOutcome::Undocumented,
        };
        Some(outcome)
    }

    /// Title fights carry a "TFC Champion" bonus among the record annotations
    pub fn is_championship(&self) -> bool {
        self.records
            .iter()
            .any(|line| line.to_lowercase().contains("tfc champion"))
    }

    /// Winner present implies a participant and no draw; winner absent implies draw or undocumented
    pub fn satisfies_outcome_invariant(&self) -> bool {
        match &self.winner_name {
            Some(winner) => self.has_participant(winner) && self.outcome_kind != OutcomeKind::Draw,
            None => !self.outcome_kind.is_decisive(),
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.winner_name, self.outcome_kind) {
            (Some(winner), kind) => {
                let loser = self.opponent_of(winner).unwrap_or("?");
                write!(f, "{} beats {} via {} in: {}/{}", winner, loser, kind.as_str().to_lowercase(), self.event_name, self.name)
            }
            (None, OutcomeKind::Draw) => write!(
                f,
                "{} draws with {} in: {}/{}",
                self.player1_name, self.player2_name, self.event_name, self.name
            ),
            (None, _) => write!(
                f,
                "{} vs {} in: {}/{}",
                self.player1_name, self.player2_name, self.event_name, self.name
            ),
        }
    }
}
