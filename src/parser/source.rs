use anyhow::{bail, Result};
use std::path::Path;

/// On-disk flavour of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Free-text `.txt` report
    Legacy,
    /// Key/value `.json` report
    Structured,
}

impl ReportFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "txt" => Some(ReportFormat::Legacy),
            "json" => Some(ReportFormat::Structured),
            _ => None,
        }
    }
}

/// Where a report came from: its event folder and its file stem
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSource {
    pub event: String,
    pub name: String,
    pub format: ReportFormat,
}

impl ReportSource {
    pub fn new(event: &str, name: &str, format: ReportFormat) -> Self {
        Self {
            event: event.to_string(),
            name: name.to_string(),
            format,
        }
    }

    /// `<root>/<event>/<name>.<txt|json>`
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ReportFormat::from_extension)
        else {
            bail!("Unsupported report extension: {}", path.display());
        };

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let event = path
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|dir| dir.to_str())
            .unwrap_or_default();

        Ok(Self::new(event, name, format))
    }

    /// Participants encoded in the file stem
    pub fn participants(&self) -> Option<(String, String)> {
        participants_from_stem(&self.name)
    }
}

/// Split `<name1>_vs_<name2>[ <n>]` into two lower-cased names
///
/// Repeat matches carry a trailing ` <n>` counter which is dropped.
pub fn participants_from_stem(stem: &str) -> Option<(String, String)> {
    let lowered = stem.trim().to_lowercase();
    let (first, rest) = lowered.split_once("_vs_")?;
    let second = rest.split_whitespace().next()?;

    if first.is_empty() {
        return None;
    }
    Some((first.to_string(), second.to_string()))
}
