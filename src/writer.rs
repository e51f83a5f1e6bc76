use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::MatchRecord;
use crate::errors::write_context;
use crate::parser::structured::{META_KEY, RECORDS_KEY, RESULT_KEY, WINNER_KEY};

/// Placeholder result line for reports without a result block
const UNKNOWN_RESULT_LINE: &str = "Unknown";

/// Writes parsed records in the structured report format
pub struct RecordWriter {
    overwrite: bool,
}

impl RecordWriter {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Write `record` as `<source stem>.json` next to its source report.
    ///
    /// Returns None when the target exists and overwriting is off.
    pub fn write_beside(&self, source: &Path, record: &MatchRecord) -> Result<Option<PathBuf>> {
        let target = source.with_extension("json");
        if target.exists() && !self.overwrite {
            info!("  → Keeping existing {}", target.display());
            return Ok(None);
        }

        self.write_json(&target, &to_structured(record))?;
        info!("  → Wrote {}", target.display());
        Ok(Some(target))
    }

    // --- Helper Methods ---

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize structured report")?;
        fs::write(path, json).with_context(|| write_context(&path.display().to_string()))?;
        Ok(())
    }
}

/// `{Meta, Records, Result, <player1>, <player2>, Winner}` in that key order
pub fn to_structured(record: &MatchRecord) -> Value {
    let mut meta = Map::new();
    meta.insert("Name".to_string(), json!(record.name));
    meta.insert("Event".to_string(), json!(record.event_name));
    if !record.meta_lines.is_empty() {
        meta.insert("random".to_string(), json!(record.meta_lines));
    }

    let mut result = if record.result_lines.is_empty() {
        vec![UNKNOWN_RESULT_LINE.to_string()]
    } else {
        record.result_lines.clone()
    };
    result.push(record.outcome_kind.as_str().to_string());

    let mut report = Map::new();
    report.insert(META_KEY.to_string(), Value::Object(meta));
    report.insert(RECORDS_KEY.to_string(), json!(record.records));
    report.insert(RESULT_KEY.to_string(), json!(result));
    for player in record.participants() {
        let stats = record.stats_for(player).cloned().unwrap_or_default();
        report.insert(player.to_string(), json!(stats));
    }
    if let Some(winner) = &record.winner_name {
        report.insert(WINNER_KEY.to_string(), json!(winner));
    }

    Value::Object(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{RecordParser, ReportFormat, ReportSource};

    const REPORT: &str = "\
TFC 4 Prelims
Alice
Strikes Landed 12
Accuracy 48%
Bob
Strikes Landed 9
Accuracy 37.5%
--- RECORDS ---
Alice - TFC Champion
--- RESULT ---
Alice via submission.";

    fn parse(text: &str) -> MatchRecord {
        let source = ReportSource::new("TFC_4", "Alice_vs_Bob", ReportFormat::Legacy);
        RecordParser::new().unwrap().parse(text, &source).unwrap().record
    }

    #[test]
    fn test_key_order() {
        let value = to_structured(&parse(REPORT));
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Meta", "Records", "Result", "alice", "bob", "Winner"]);
        assert_eq!(value["Result"], json!(["Alice via submission.", "SUBMISSION"]));
        assert_eq!(value["Meta"]["random"], json!(["TFC 4 Prelims"]));
    }

    #[test]
    fn test_converted_report_reads_back_identically() {
        let legacy = parse(REPORT);
        let text = serde_json::to_string_pretty(&to_structured(&legacy)).unwrap();

        let source = ReportSource::new("TFC_4", "Alice_vs_Bob", ReportFormat::Structured);
        let structured = RecordParser::new().unwrap().parse(&text, &source).unwrap();

        assert!(structured.warnings.is_empty());
        assert_eq!(structured.record, legacy);
    }

    #[test]
    fn test_missing_result_block_is_written_as_unknown() {
        let record = parse("Alice\nStrikes Landed 1\nBob\nStrikes Landed 2");
        let value = to_structured(&record);

        assert_eq!(value["Result"], json!(["Unknown", "UNDOCUMENTED"]));
        assert!(value.get("Winner").is_none());
    }

    #[test]
    fn test_write_beside_respects_overwrite_flag() {
        let dir = std::env::temp_dir().join(format!("tfc_records_writer_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("Alice_vs_Bob.txt");
        fs::write(&source, REPORT).unwrap();
        let record = parse(REPORT);

        let written = RecordWriter::new(false).write_beside(&source, &record).unwrap();
        assert_eq!(written, Some(dir.join("Alice_vs_Bob.json")));
        assert_eq!(RecordWriter::new(false).write_beside(&source, &record).unwrap(), None);
        assert!(RecordWriter::new(true).write_beside(&source, &record).unwrap().is_some());

        fs::remove_dir_all(&dir).unwrap();
    }
}
