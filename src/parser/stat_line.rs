use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::StatValue;
use crate::errors::ParseError;

/// Marker lines made of dashes, e.g. `--- RESULT ---`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divider {
    Records,
    Result,
    Plain,
}

/// Compiled line patterns of the free-text report format
#[derive(Debug, Clone)]
pub struct LinePatterns {
    stat_line: Regex,
    marker: Regex,
    plain_divider: Regex,
}

impl LinePatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stat_line: Self::compile_stat_line_regex()?,
            marker: Self::compile_marker_regex()?,
            plain_divider: Self::compile_plain_divider_regex()?,
        })
    }

    // --- Construction Helpers ---

    fn compile_stat_line_regex() -> Result<Regex> {
        // The value token cannot contain whitespace, so the lazy label splits on the last whitespace run.
        // Any digit-bearing token counts; malformed ones are rejected when the value is parsed.
        Regex::new(r"^(?P<label>.+?)\s+(?P<value>\S*[0-9]\S*|(?i:N/A))$")
            .context("Failed to compile stat line regex")
    }

    fn compile_marker_regex() -> Result<Regex> {
        Regex::new(r"(?i)^-{2,}\s*(?P<marker>RESULTS?|RECORDS?)\s*-{2,}$").context("Failed to compile block marker regex")
    }

    fn compile_plain_divider_regex() -> Result<Regex> {
        Regex::new(r"^-{3,}\s*$").context("Failed to compile divider regex")
    }

    // --- Line Classification ---

    /// Split a stat line into its label and raw value token
    pub fn split_stat_line<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let captures = self.stat_line.captures(line)?;
        let label = captures.name("label")?.as_str().trim();
        let value = captures.name("value")?.as_str();
        Some((label, value))
    }

    pub fn is_stat_line(&self, line: &str) -> bool {
        self.stat_line.is_match(line)
    }

    pub fn divider(&self, line: &str) -> Option<Divider> {
        if let Some(captures) = self.marker.captures(line) {
            let marker = captures.name("marker")?.as_str().to_uppercase();
            let divider = if marker.starts_with("RESULT") {
                Divider::Result
            } else {
                Divider::Records
            };
            return Some(divider);
        }

        self.plain_divider.is_match(line).then_some(Divider::Plain)
    }
}

/// Normalize a stat label into its storage key
pub fn normalize_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Parse a value token: `45%` and `2.5` are floats, `12` and `-3` are integers
pub fn parse_stat_value(label: &str, token: &str) -> std::result::Result<StatValue, ParseError> {
    let malformed = || ParseError::MalformedStatValue {
        label: label.to_string(),
        value: token.to_string(),
    };

    let token = token.trim();
    let (number, is_percent) = match token.strip_suffix('%') {
        Some(number) => (number, true),
        None => (token, false),
    };

    if !is_numeric_literal(number) {
        return Err(malformed());
    }

    if is_percent || number.contains('.') {
        let value: f64 = number.parse().map_err(|_| malformed())?;
        if !value.is_finite() {
            return Err(malformed());
        }
        Ok(StatValue::Float(value))
    } else {
        number.parse::<i64>().map(StatValue::Int).map_err(|_| malformed())
    }
}

fn is_numeric_literal(number: &str) -> bool {
    let unsigned = number.strip_prefix(['-', '+']).unwrap_or(number);
    let has_digit = unsigned.chars().any(|c| c.is_ascii_digit());
    let dots = unsigned.chars().filter(|&c| c == '.').count();
    has_digit && dots <= 1 && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
}
