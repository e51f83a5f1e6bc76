use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::EventKey;
use crate::parser::ReportFormat;

/// Every `.txt`/`.json` report under `<root>/<event>/`, sorted by event then file name
pub fn report_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for event_dir in read_dir_sorted(root)? {
        if !event_dir.is_dir() {
            continue;
        }
        for path in read_dir_sorted(&event_dir)? {
            if path.is_file() && report_format(&path).is_some() {
                paths.push(path);
            }
        }
    }

    paths.sort_by_cached_key(|path| sort_key(path));
    Ok(paths)
}

/// Drop a `.txt` report when its converted `.json` sits in the same folder
pub fn prefer_structured(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut by_stem: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();
    let mut order: Vec<PathBuf> = Vec::new();

    for path in paths {
        let stem = path.with_extension("");
        match by_stem.get(&stem) {
            Some(existing) if report_format(existing) == Some(ReportFormat::Structured) => {
                debug!("Skipping {} in favour of {}", path.display(), existing.display());
            }
            Some(_) if report_format(&path) == Some(ReportFormat::Structured) => {
                by_stem.insert(stem, path);
            }
            Some(_) => {}
            None => {
                order.push(stem.clone());
                by_stem.insert(stem, path);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|stem| by_stem.remove(&stem))
        .collect()
}

/// Legacy reports only, for conversion
pub fn legacy_paths(root: &Path) -> Result<Vec<PathBuf>> {
    Ok(report_paths(root)?
        .into_iter()
        .filter(|path| report_format(path) == Some(ReportFormat::Legacy))
        .collect())
}

fn report_format(path: &Path) -> Option<ReportFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ReportFormat::from_extension)
}

fn sort_key(path: &Path) -> (EventKey, String) {
    let event = path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|dir| dir.to_str())
        .unwrap_or_default();
    let file = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    (EventKey::new(event), file.to_string())
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
