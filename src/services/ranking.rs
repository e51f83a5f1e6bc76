use anyhow::{bail, Context, Result};
use colored::Colorize;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::PlayerProfile;
use crate::history::HistoryStore;
use crate::parser::RecordParser;
use crate::rating::{Leaderboard, RatingEngine, RatingTable, TrueSkill};
use crate::stats::{aggregate, match_history};

/// Leaderboard, stats and trajectories over a loaded history
pub struct RankingService {
    config: AppConfig,
    store: HistoryStore,
}

impl RankingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("=== Loading match history ===\n");
        let parser = RecordParser::new()?;
        let store = HistoryStore::load_dir(&config.history.data_dir, &parser)?;
        Ok(Self { config, store })
    }

    pub fn ratings(&self) -> Result<()> {
        let table = self.replay()?;
        let recent = &self.config.history.recent_events;
        let board = Leaderboard::build(&self.store, &table, recent);

        if !board.has_activity_split() {
            println!("{}", "# Rankings".bold());
            println!("<Name>: <W>-<L>-<D> <rating>\n");
            for standing in &board.standings {
                println!("{}", standing);
            }
            return Ok(());
        }

        println!("{}", format!("# Active rankings (last {} events)", recent.len()).bold());
        println!("<Name>: <W>-<L>-<D> <{}> <rating>\n", recent.join(", "));
        for standing in board.active() {
            println!("{}", standing);
        }

        println!("\n{}", "# Inactive rankings".bold());
        println!("<Name>: <W>-<L>-<D> <rating>\n");
        for standing in board.inactive() {
            println!("{}", standing);
        }
        Ok(())
    }

    pub fn stats(&self, player: &str, event: Option<&str>, as_json: bool) -> Result<()> {
        let profile = self.profile(player)?;
        let summary = aggregate(profile, event);
        if summary.matches == 0 {
            bail!("{} has no matches in {}", profile.name(), event.unwrap_or("any event"));
        }

        if as_json {
            let json = serde_json::to_string_pretty(&summary).context("Failed to serialize stats")?;
            println!("{}", json);
            return Ok(());
        }

        let scope = event.unwrap_or("career");
        println!("{} ({}, {} matches)", summary.name.bold(), scope, summary.matches);
        println!("  W-L-D: {}", summary.record);
        for (key, value) in &summary.stats {
            println!("  {}: {}", key, value);
        }

        println!("\n{}", "Match history".bold());
        for line in match_history(profile, event) {
            println!("  {}", line);
        }
        Ok(())
    }

    pub fn history(&self, player: &str) -> Result<()> {
        let profile = self.profile(player)?;
        let table = self.replay()?;

        let steps = table.trajectory(profile.name());
        if steps.is_empty() {
            bail!("{} has no rated matches", profile.name());
        }

        println!("{}", format!("# Rating history of {}", profile.name()).bold());
        for step in steps {
            println!("{}", step);
        }
        if let Some(rating) = table.get(profile.name()) {
            println!("\nFinal: {:.1}, ({})", rating.conservative(), rating);
        }
        Ok(())
    }

    // --- Helper Methods ---

    fn replay(&self) -> Result<RatingTable> {
        let engine = RatingEngine::new(TrueSkill::new(&self.config.rating))
            .with_event_filter(self.config.history.rated_events.iter().cloned());
        let table = engine
            .replay(self.store.matches())
            .context("Rating replay aborted on corrupt match data")?;
        Ok(table)
    }

    fn profile(&self, player: &str) -> Result<&PlayerProfile> {
        match self.store.player(player) {
            Some(profile) => Ok(profile),
            None => bail!("No matches found for player: {}", player),
        }
    }
}
