use anyhow::Result;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::discovery::{prefer_structured, report_paths};
use crate::domain::{sort_events, MatchRecord, PlayerProfile};
use crate::parser::{ParsedReport, RecordParser, ReportSource};

/// A report that could not be loaded, with its cause
#[derive(Debug)]
pub struct LoadError {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// In-memory index of every loaded match, by player and in load order
#[derive(Debug, Default)]
pub struct HistoryStore {
    players: BTreeMap<String, PlayerProfile>,
    matches: Vec<Arc<MatchRecord>>,
    errors: Vec<LoadError>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MatchRecord>,
    {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Load `<root>/<event>/*.{txt,json}`, parsing files in parallel.
    ///
    /// Unparseable reports are logged and collected in `errors()`; only an unreadable root fails.
    pub fn load_dir(root: &Path, parser: &RecordParser) -> Result<Self> {
        let paths = prefer_structured(report_paths(root)?);
        info!("  → Found {} reports under {}", paths.len(), root.display());

        let parsed: Vec<(PathBuf, Result<ParsedReport>)> = paths
            .into_par_iter()
            .map(|path| {
                let result = parser.parse_file(&path);
                (path, result)
            })
            .collect();

        let mut store = Self::new();
        for (path, result) in parsed {
            match result {
                Ok(report) => store.accept(&path, report),
                Err(error) => {
                    warn!("Skipping {}: {:#}", path.display(), error);
                    store.errors.push(LoadError { path, error });
                }
            }
        }

        info!(
            "  → Loaded {} matches for {} players ({} skipped)",
            store.matches.len(),
            store.players.len(),
            store.errors.len()
        );
        Ok(store)
    }

    fn accept(&mut self, path: &Path, report: ParsedReport) {
        for warning in &report.warnings {
            warn!("{}: {}", path.display(), warning);
        }
        warn_on_name_mismatch(path, &report.record);
        self.insert(report.record);
    }

    /// Wire a record into both participants' profiles
    pub fn insert(&mut self, record: MatchRecord) {
        let record = Arc::new(record);
        for name in record.participants() {
            self.players
                .entry(name.to_string())
                .or_insert_with(|| PlayerProfile::new(name))
                .add_match(Arc::clone(&record));
        }
        self.matches.push(record);
    }

    pub fn player(&self, name: &str) -> Option<&PlayerProfile> {
        self.players.get(&name.to_lowercase())
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.players.values()
    }

    /// All matches in load order
    pub fn matches(&self) -> &[Arc<MatchRecord>] {
        &self.matches
    }

    /// Distinct event names, chronologically
    pub fn events(&self) -> Vec<String> {
        let mut events: Vec<String> = self.matches.iter().map(|m| m.event_name.clone()).collect();
        events.sort();
        events.dedup();
        sort_events(&mut events);
        events
    }

    pub fn errors(&self) -> &[LoadError] {
        &self.errors
    }
}

fn warn_on_name_mismatch(path: &Path, record: &MatchRecord) {
    let Some((first, second)) = ReportSource::from_path(path).ok().and_then(|source| source.participants()) else {
        return;
    };

    let mut expected = [first.as_str(), second.as_str()];
    let mut found = record.participants();
    expected.sort_unstable();
    found.sort_unstable();
    if expected != found {
        warn!(
            "{}: file name names {} vs {}, report names {} vs {}",
            path.display(),
            first,
            second,
            record.player1_name,
            record.player2_name
        );
    }
}
