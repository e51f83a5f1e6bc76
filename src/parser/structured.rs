use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::draft::RecordDraft;
use super::result::{interpret_result_line, resolve_winner, Verdict};
use super::source::{participants_from_stem, ReportSource};
use super::stat_line::{normalize_key, parse_stat_value};
use super::ParsedReport;
use crate::domain::{OutcomeKind, StatBlock, StatValue};
use crate::errors::ParseError;

pub const META_KEY: &str = "Meta";
pub const RESULT_KEY: &str = "Result";
pub const RECORDS_KEY: &str = "Records";
pub const WINNER_KEY: &str = "Winner";

/// Marker written by converters when a report had no result block
const UNKNOWN_RESULT: &str = "unknown";

/// Fields of a structured report before participants are settled
#[derive(Default)]
struct StructuredFields {
    event: Option<String>,
    name: Option<String>,
    meta_lines: Vec<String>,
    records: Vec<String>,
    result_lines: Vec<String>,
    winner: Option<String>,
    players: Vec<(String, StatBlock)>,
    warnings: Vec<ParseError>,
}

/// Read a flat `{Meta, Result, Records, Winner, <player>, <player>}` report
pub fn read_structured(text: &str, source: &ReportSource) -> Result<ParsedReport, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyRecord);
    }

    let value: Value = serde_json::from_str(text).map_err(|e| ParseError::InvalidStructure {
        reason: e.to_string(),
    })?;
    let Value::Object(map) = value else {
        return Err(invalid("top level is not an object"));
    };
    if map.is_empty() {
        return Err(ParseError::EmptyRecord);
    }

    let fields = collect_fields(map, source)?;
    build_report(fields, source)
}

fn collect_fields(map: Map<String, Value>, source: &ReportSource) -> Result<StructuredFields, ParseError> {
    let mut fields = StructuredFields::default();

    for (key, value) in map {
        match key.as_str() {
            META_KEY => read_meta(&value, &mut fields)?,
            RESULT_KEY => fields.result_lines = string_list(&value, RESULT_KEY)?,
            RECORDS_KEY => fields.records = string_list(&value, RECORDS_KEY)?,
            WINNER_KEY => fields.winner = Some(read_winner(&value)?),
            _ if fields.players.len() < 2 => {
                let block = read_stat_block(&key, &value)?;
                fields.players.push((key.trim().to_lowercase(), block));
            }
            _ => {
                warn!("Unknown key in data: {} from {}/{}", key, source.event, source.name);
                fields.warnings.push(ParseError::UnrecognizedKey { key });
            }
        }
    }

    Ok(fields)
}

fn build_report(fields: StructuredFields, source: &ReportSource) -> Result<ParsedReport, ParseError> {
    let StructuredFields {
        event,
        name,
        meta_lines,
        records,
        result_lines,
        winner,
        players,
        warnings,
    } = fields;

    let name = name.unwrap_or_else(|| source.name.clone());
    let (player1, player2, stats) = settle_participants(players, &name)?;
    let verdict = structured_verdict(&result_lines, winner.as_deref(), &player1, &player2)?;
    let result_lines = without_converter_markers(result_lines);

    let draft = RecordDraft {
        event_name: event.unwrap_or_else(|| source.event.clone()),
        name,
        player1_name: player1,
        player2_name: player2,
        stats,
        verdict,
        meta_lines,
        records,
        result_lines,
    };

    Ok(ParsedReport {
        record: draft.build(),
        warnings,
    })
}

// --- Field Readers ---

fn read_meta(value: &Value, fields: &mut StructuredFields) -> Result<(), ParseError> {
    let Value::Object(meta) = value else {
        return Err(invalid("Meta is not an object"));
    };

    fields.event = meta.get("Event").and_then(Value::as_str).map(str::to_string);
    fields.name = meta.get("Name").and_then(Value::as_str).map(str::to_string);
    if let Some(random) = meta.get("random") {
        fields.meta_lines = string_list(random, "Meta.random")?;
    }
    Ok(())
}

fn read_winner(value: &Value) -> Result<String, ParseError> {
    value
        .as_str()
        .map(|winner| winner.trim().to_lowercase())
        .ok_or_else(|| invalid("Winner is not a string"))
}

/// `Result` and `Records` hold either one string (older files) or a list of strings
fn string_list(value: &Value, field: &str) -> Result<Vec<String>, ParseError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(line) => Ok(vec![line.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(&format!("{} contains a non-string entry", field)))
            })
            .collect(),
        _ => Err(invalid(&format!("{} is neither a string nor a list", field))),
    }
}

fn read_stat_block(player: &str, value: &Value) -> Result<StatBlock, ParseError> {
    let Value::Object(entries) = value else {
        return Err(invalid(&format!("stats for {} are not an object", player)));
    };

    let mut block = StatBlock::new();
    for (label, raw) in entries {
        let key = normalize_key(label);
        let value = json_stat_value(&key, raw)?;
        if let Some(previous) = block.insert(key.clone(), value) {
            debug!("Stat {:?} declared twice for {}: {} replaced by {}", key, player, previous, value);
        }
    }
    Ok(block)
}

fn json_stat_value(label: &str, raw: &Value) -> Result<StatValue, ParseError> {
    let malformed = || ParseError::MalformedStatValue {
        label: label.to_string(),
        value: raw.to_string(),
    };

    match raw {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(StatValue::Int(int))
            } else if number.is_u64() {
                Err(malformed())
            } else {
                number.as_f64().map(StatValue::Float).ok_or_else(malformed)
            }
        }
        Value::String(token) => parse_stat_value(label, token),
        _ => Err(malformed()),
    }
}

// --- Participants & Outcome ---

/// Two player keys, or fall back to the `<a>_vs_<b>` file name for whoever is missing
fn settle_participants(
    players: Vec<(String, StatBlock)>,
    name: &str,
) -> Result<(String, String, BTreeMap<String, StatBlock>), ParseError> {
    let found = players.len();
    let mut stats: BTreeMap<String, StatBlock> = BTreeMap::new();
    let mut names: Vec<String> = Vec::new();
    for (player, block) in players {
        names.push(player.clone());
        stats.insert(player, block);
    }

    if found < 2 {
        let (first, second) =
            participants_from_stem(name).ok_or(ParseError::MissingParticipants { found })?;
        if names.iter().any(|n| *n != first && *n != second) {
            return Err(ParseError::MissingParticipants { found });
        }
        names = vec![first, second];
    }

    let mut names = names.into_iter();
    match (names.next(), names.next()) {
        (Some(player1), Some(player2)) if player1 != player2 => Ok((player1, player2, stats)),
        _ => Err(ParseError::MissingParticipants { found }),
    }
}

fn structured_verdict(
    result_lines: &[String],
    declared_winner: Option<&str>,
    player1: &str,
    player2: &str,
) -> Result<Verdict, ParseError> {
    let declared = declared_winner
        .map(|winner| resolve_winner(winner, player1, player2))
        .transpose()?;

    let Some(last) = result_lines.last().filter(|line| !line.trim().eq_ignore_ascii_case(UNKNOWN_RESULT)) else {
        return Ok(Verdict {
            winner: declared,
            kind: OutcomeKind::Undocumented,
        });
    };

    let (kind, phrase_winner) = match OutcomeKind::from_tag(last) {
        Some(kind) => {
            // Converters append the tag after the original result line
            let previous = result_lines.iter().rev().nth(1);
            let phrase_winner = previous
                .and_then(|line| interpret_result_line(line, player1, player2).ok())
                .and_then(|verdict| verdict.winner);
            (kind, phrase_winner)
        }
        None => {
            let verdict = interpret_result_line(last, player1, player2)?;
            (verdict.kind, verdict.winner)
        }
    };

    match (kind.is_decisive(), declared.or(phrase_winner)) {
        (true, Some(winner)) => Ok(Verdict {
            winner: Some(winner),
            kind,
        }),
        (true, None) => Err(ParseError::AmbiguousWinner {
            winner: String::new(),
            player1: player1.to_string(),
            player2: player2.to_string(),
        }),
        (false, Some(_)) => Err(ParseError::UnknownOutcomePhrase { line: last.clone() }),
        (false, None) => Ok(Verdict { winner: None, kind }),
    }
}

/// Drop the trailing kind tag and the "Unknown" placeholder a converter adds
fn without_converter_markers(mut result_lines: Vec<String>) -> Vec<String> {
    if result_lines.last().is_some_and(|line| OutcomeKind::from_tag(line).is_some()) {
        result_lines.pop();
    }
    if let [only] = result_lines.as_slice() {
        if only.trim().eq_ignore_ascii_case(UNKNOWN_RESULT) {
            result_lines.clear();
        }
    }
    result_lines
}

fn invalid(reason: &str) -> ParseError {
    ParseError::InvalidStructure {
        reason: reason.to_string(),
    }
}
