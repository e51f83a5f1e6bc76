pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod history;
pub mod parser;
pub mod rating;
pub mod services;
pub mod stats;
pub mod writer;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::settings::AppConfig;
use crate::services::{ProcessingService, RankingService};

pub fn interpret() -> Cli {
    Cli::parse()
}

fn load_config(data_dir: Option<PathBuf>) -> AppConfig {
    AppConfig::new().with_data_dir(data_dir)
}

pub fn handle_convert(data_dir: Option<PathBuf>, overwrite: bool) -> Result<()> {
    let service = ProcessingService::new(load_config(data_dir))?;
    service.convert(overwrite)
}

pub fn handle_check(data_dir: Option<PathBuf>) -> Result<()> {
    let service = ProcessingService::new(load_config(data_dir))?;
    service.check()
}

pub fn handle_ratings(data_dir: Option<PathBuf>, recent: Vec<String>, events: Vec<String>) -> Result<()> {
    let config = load_config(data_dir)
        .with_recent_events(recent)
        .with_rated_events(events);
    let service = RankingService::new(config)?;
    service.ratings()
}

pub fn handle_stats(data_dir: Option<PathBuf>, player: &str, event: Option<&str>, json: bool) -> Result<()> {
    let service = RankingService::new(load_config(data_dir))?;
    service.stats(player, event, json)
}

pub fn handle_history(data_dir: Option<PathBuf>, player: &str, events: Vec<String>) -> Result<()> {
    let config = load_config(data_dir).with_rated_events(events);
    let service = RankingService::new(config)?;
    service.history(player)
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
