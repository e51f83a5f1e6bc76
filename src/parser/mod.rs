mod draft;
mod legacy;
mod result;
mod source;
mod stat_line;
pub mod structured;

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::domain::MatchRecord;
use crate::errors::{with_read_context, ParseError};
use legacy::LegacyReader;
use stat_line::LinePatterns;

pub use result::{interpret_result_line, Verdict};
pub use source::{participants_from_stem, ReportFormat, ReportSource};
pub use stat_line::parse_stat_value;

/// A parsed record plus non-fatal warnings (unrecognized keys)
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub record: MatchRecord,
    pub warnings: Vec<ParseError>,
}

/// Turns raw reports, free-text or structured, into match records
pub struct RecordParser {
    patterns: LinePatterns,
}

impl RecordParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: LinePatterns::new()?,
        })
    }

    /// Parse one report's text
    pub fn parse(&self, text: &str, source: &ReportSource) -> std::result::Result<ParsedReport, ParseError> {
        match source.format {
            ReportFormat::Legacy => {
                let record = LegacyReader::new(&self.patterns).read(text, source)?;
                Ok(ParsedReport {
                    record,
                    warnings: Vec::new(),
                })
            }
            ReportFormat::Structured => structured::read_structured(text, source),
        }
    }

    /// Read and parse `<event>/<name>.<txt|json>`
    pub fn parse_file(&self, path: &Path) -> Result<ParsedReport> {
        let source = ReportSource::from_path(path)?;
        let text = with_read_context(fs::read_to_string(path), &path.display().to_string())?;
        Ok(self.parse(&text, &source)?)
    }
}
