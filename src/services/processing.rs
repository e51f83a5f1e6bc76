use anyhow::Result;
use colored::Colorize;
use log::{info, warn};

use crate::config::settings::AppConfig;
use crate::domain::{classify_keys, FormatEra, MatchRecord};
use crate::history::discovery::{legacy_paths, prefer_structured, report_paths};
use crate::parser::RecordParser;
use crate::writer::RecordWriter;

/// File-level batch jobs over the report corpus
pub struct ProcessingService {
    config: AppConfig,
    parser: RecordParser,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            config,
            parser: RecordParser::new()?,
        })
    }

    /// Parse every `.txt` report and write its structured twin
    pub fn convert(&self, overwrite: bool) -> Result<()> {
        let root = &self.config.history.data_dir;
        info!("=== Converting reports in {} ===\n", root.display());

        let paths = legacy_paths(root)?;
        info!("  → Found {} free-text reports", paths.len());

        let writer = RecordWriter::new(overwrite);
        let (mut written, mut kept, mut failed) = (0, 0, 0);
        for path in &paths {
            let report = match self.parser.parse_file(path) {
                Ok(report) => report,
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    failed += 1;
                    continue;
                }
            };

            match writer.write_beside(path, &report.record)? {
                Some(_) => written += 1,
                None => kept += 1,
            }
        }

        info!("  → {} written, {} already converted, {} failed", written, kept, failed);
        info!("=== Conversion Complete ===");
        Ok(())
    }

    /// Print each report's format era and flag key sets matching neither era exactly
    pub fn check(&self) -> Result<()> {
        let root = &self.config.history.data_dir;
        let paths = prefer_structured(report_paths(root)?);
        info!("  → Checking {} reports in {}", paths.len(), root.display());

        let mut flagged = 0;
        for path in &paths {
            let record = match self.parser.parse_file(path) {
                Ok(report) => report.record,
                Err(e) => {
                    println!("{} {}: {:#}", "ERROR".red().bold(), path.display(), e);
                    flagged += 1;
                    continue;
                }
            };

            if !self.print_era(&record) {
                flagged += 1;
            }
        }

        println!("\n{} of {} reports flagged", flagged, paths.len());
        Ok(())
    }

    /// Returns whether every player block matches its era's key table exactly
    fn print_era(&self, record: &MatchRecord) -> bool {
        let mut exact = true;
        for (player, block) in &record.stats {
            let report = classify_keys(block.keys().map(String::as_str));
            if report.is_exact() {
                continue;
            }
            exact = false;

            let era = match report.era {
                FormatEra::Unknown => report.era.as_str().yellow(),
                _ => report.era.as_str().normal(),
            };
            println!("{}/{} [{}] {}", record.event_name, record.name, era, player.bold());
            if !report.missing.is_empty() {
                println!("    missing: {}", join(&report.missing));
            }
            if !report.extra.is_empty() {
                println!("    extra:   {}", join(&report.extra));
            }
        }

        if exact {
            println!("{}/{} [{}]", record.event_name, record.name, record.format_era.as_str().green());
        }
        exact
    }
}

fn join<'a, I: IntoIterator<Item = &'a String>>(keys: I) -> String {
    keys.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
