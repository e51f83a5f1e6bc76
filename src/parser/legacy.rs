use log::{debug, warn};
use std::collections::BTreeMap;

use super::draft::RecordDraft;
use super::result::{interpret_result_line, Verdict};
use super::source::ReportSource;
use super::stat_line::{normalize_key, parse_stat_value, Divider, LinePatterns};
use crate::domain::{MatchRecord, StatBlock};
use crate::errors::ParseError;

const MAX_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Meta,
    Players,
    Records,
    Result,
}

/// Free-text report state machine: META → PLAYER_BLOCK → RECORD_BLOCK → RESULT_BLOCK
pub struct LegacyReader<'a> {
    patterns: &'a LinePatterns,
    block: Block,
    /// In order of first appearance
    players: Vec<String>,
    current: Option<usize>,
    stats: BTreeMap<String, StatBlock>,
    meta_lines: Vec<String>,
    records: Vec<String>,
    result_lines: Vec<String>,
}

impl<'a> LegacyReader<'a> {
    pub fn new(patterns: &'a LinePatterns) -> Self {
        Self {
            patterns,
            block: Block::Meta,
            players: Vec::new(),
            current: None,
            stats: BTreeMap::new(),
            meta_lines: Vec::new(),
            records: Vec::new(),
            result_lines: Vec::new(),
        }
    }

    pub fn read(mut self, text: &str, source: &ReportSource) -> Result<MatchRecord, ParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(ParseError::EmptyRecord);
        }

        for (idx, line) in lines.iter().enumerate() {
            let next = lines.get(idx + 1).copied();
            self.consume(line, next)?;
        }

        self.finish(source)
    }

    fn consume(&mut self, line: &str, next: Option<&str>) -> Result<(), ParseError> {
        // Everything after the result divider is kept verbatim
        if self.block != Block::Result {
            if let Some(divider) = self.patterns.divider(line) {
                self.apply_divider(divider);
                return Ok(());
            }
        }

        match self.block {
            Block::Meta => self.consume_meta(line, next),
            Block::Players => self.consume_player_line(line),
            Block::Records => {
                self.records.push(line.to_string());
                Ok(())
            }
            Block::Result => {
                self.result_lines.push(line.to_string());
                Ok(())
            }
        }
    }

    fn apply_divider(&mut self, divider: Divider) {
        match divider {
            Divider::Result => self.block = Block::Result,
            Divider::Records => self.block = Block::Records,
            Divider::Plain => {}
        }
    }

    // --- Block Handlers ---

    fn consume_meta(&mut self, line: &str, next: Option<&str>) -> Result<(), ParseError> {
        let starts_player = !self.patterns.is_stat_line(line)
            && next.is_some_and(|next| self.patterns.is_stat_line(next));

        if starts_player {
            self.block = Block::Players;
            self.start_player(line)
        } else {
            self.meta_lines.push(line.to_string());
            Ok(())
        }
    }

    fn consume_player_line(&mut self, line: &str) -> Result<(), ParseError> {
        match self.patterns.split_stat_line(line) {
            Some((label, token)) => self.insert_stat(label, token),
            None => self.start_player(line),
        }
    }

    fn start_player(&mut self, line: &str) -> Result<(), ParseError> {
        let name = line.trim().to_lowercase();

        // A repeated name reopens that player's block
        if let Some(pos) = self.players.iter().position(|p| *p == name) {
            self.current = Some(pos);
            return Ok(());
        }

        if self.players.len() == MAX_PARTICIPANTS {
            return Err(ParseError::ExtraParticipant { name });
        }

        self.stats.insert(name.clone(), StatBlock::new());
        self.players.push(name);
        self.current = Some(self.players.len() - 1);
        Ok(())
    }

    fn insert_stat(&mut self, label: &str, token: &str) -> Result<(), ParseError> {
        let value = parse_stat_value(label, token)?;
        let key = normalize_key(label);

        let Some(current) = self.current.map(|idx| &self.players[idx]) else {
            return Ok(());
        };
        let block = self.stats.entry(current.clone()).or_default();
        if let Some(previous) = block.insert(key.clone(), value) {
            debug!("Stat {:?} declared twice for {}: {} replaced by {}", key, current, previous, value);
        }
        Ok(())
    }

    // --- Completion ---

    fn finish(self, source: &ReportSource) -> Result<MatchRecord, ParseError> {
        let found = self.players.len();
        let Ok([player1, player2]) = <[String; 2]>::try_from(self.players) else {
            return Err(ParseError::MissingParticipants { found });
        };

        let verdict = match self.result_lines.last() {
            Some(line) => interpret_result_line(line, &player1, &player2)?,
            None => {
                warn!("No result block in {}/{}; treating as undocumented", source.event, source.name);
                Verdict::undocumented()
            }
        };

        let draft = RecordDraft {
            event_name: source.event.clone(),
            name: source.name.clone(),
            player1_name: player1,
            player2_name: player2,
            stats: self.stats,
            verdict,
            meta_lines: self.meta_lines,
            records: self.records,
            result_lines: self.result_lines,
        };
        Ok(draft.build())
    }
}
