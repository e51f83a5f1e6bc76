use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "TFC fight records: parsing, stats and ratings")]
pub struct Cli {
    /// Directory holding one folder per event (overrides TFC_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Convert every free-text report into a structured JSON report next to it
    Convert {
        /// Replace JSON reports that already exist
        #[arg(long)]
        overwrite: bool,
    },
    /// Print the leaderboard ordered by conservative rating
    Ratings {
        /// Recent events for the streak and the active/inactive split, e.g. TFC_22,TFC_21
        #[arg(long, value_delimiter = ',')]
        recent: Vec<String>,
        /// Only rate matches from these events (defaults to all)
        #[arg(long, value_delimiter = ',')]
        events: Vec<String>,
    },
    /// Print a player's aggregated stats and W-L-D
    Stats {
        player: String,
        /// Restrict to one event
        #[arg(long)]
        event: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a player's rating trajectory
    History {
        player: String,
        /// Only rate matches from these events (defaults to all)
        #[arg(long, value_delimiter = ',')]
        events: Vec<String>,
    },
    /// Report the format era of every report and flag unexpected stat keys
    Check,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_events() {
        let cli = Cli::parse_from(["tfc_records", "ratings", "--recent", "TFC_22,TFC_21", "--events", "TFC_1"]);
        assert_eq!(
            cli.command,
            Command::Ratings {
                recent: vec!["TFC_22".to_string(), "TFC_21".to_string()],
                events: vec!["TFC_1".to_string()],
            }
        );
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::parse_from(["tfc_records", "stats", "alice", "--data-dir", "/data", "--event", "TFC_3"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/data")));
        assert_eq!(
            cli.command,
            Command::Stats {
                player: "alice".to_string(),
                event: Some("TFC_3".to_string()),
                json: false,
            }
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
