use std::collections::BTreeMap;

use super::result::Verdict;
use crate::domain::{classify_keys, MatchRecord, StatBlock};

/// Everything a reader collected before the record is frozen
pub struct RecordDraft {
    pub event_name: String,
    pub name: String,
    pub player1_name: String,
    pub player2_name: String,
    pub stats: BTreeMap<String, StatBlock>,
    pub verdict: Verdict,
    pub meta_lines: Vec<String>,
    pub records: Vec<String>,
    pub result_lines: Vec<String>,
}

impl RecordDraft {
    pub fn build(mut self) -> MatchRecord {
        for player in [&self.player1_name, &self.player2_name] {
            self.stats.entry(player.clone()).or_default();
        }

        let format_era = classify_keys(
            self.stats
                .values()
                .flat_map(|block| block.keys())
                .map(String::as_str),
        )
        .era;

        MatchRecord {
            event_name: self.event_name,
            name: self.name,
            player1_name: self.player1_name,
            player2_name: self.player2_name,
            stats: self.stats,
            winner_name: self.verdict.winner,
            outcome_kind: self.verdict.kind,
            format_era,
            meta_lines: self.meta_lines,
            records: self.records,
            result_lines: self.result_lines,
        }
    }
}
