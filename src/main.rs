use anyhow::Result;

use tfc_records::cli::{Cli, Command};
use tfc_records::{
    handle_check, handle_completions, handle_convert, handle_history, handle_ratings, handle_stats, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir;
    match cli.command {
        Command::Convert { overwrite } => handle_convert(data_dir, overwrite),
        Command::Ratings { recent, events } => handle_ratings(data_dir, recent, events),
        Command::Stats { player, event, json } => handle_stats(data_dir, &player, event.as_deref(), json),
        Command::History { player, events } => handle_history(data_dir, &player, events),
        Command::Check => handle_check(data_dir),
        Command::Completions { shell } => handle_completions(shell),
    }
}
