use anyhow::Context as _;
use thiserror::Error;

/// Failure to turn one report into a match record
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("report is empty")]
    EmptyRecord,

    #[error("malformed value {value:?} for stat {label:?}")]
    MalformedStatValue { label: String, value: String },

    #[error("winner {winner:?} is neither {player1:?} nor {player2:?}")]
    AmbiguousWinner {
        winner: String,
        player1: String,
        player2: String,
    },

    #[error("unknown outcome phrase in result line {line:?}")]
    UnknownOutcomePhrase { line: String },

    #[error("unrecognized key {key:?}")]
    UnrecognizedKey { key: String },

    #[error("third participant block {name:?} (only two players per report)")]
    ExtraParticipant { name: String },

    #[error("expected two participants, found {found}")]
    MissingParticipants { found: usize },

    #[error("invalid structured report: {reason}")]
    InvalidStructure { reason: String },
}

/// Corrupted data detected while replaying ratings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    #[error("winner {winner:?} is not a participant of {player1} vs {player2} ({event})")]
    WinnerNotParticipant {
        winner: String,
        player1: String,
        player2: String,
        event: String,
    },

    #[error("match {player1} vs {player2} ({event}) is a draw but names {winner:?} as winner")]
    WinnerInDraw {
        winner: String,
        player1: String,
        player2: String,
        event: String,
    },

    #[error("match {player1} vs {player2} ({event}) has no winner but is classified {outcome}")]
    MissingWinner {
        player1: String,
        player2: String,
        event: String,
        outcome: String,
    },
}

/// Add context to read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read report: {}", path)
}

/// Add context to write errors
pub fn write_context(path: &str) -> String {
    format!("Failed to write structured report: {}", path)
}

/// Wrap result with read context
pub fn with_read_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(read_context(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_context_names_the_report() {
        let result: Result<String, std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = with_read_context(result, "TFC_1/Alice_vs_Bob.txt").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read report: TFC_1/Alice_vs_Bob.txt");
    }

    #[test]
    fn test_rating_error_names_the_fight() {
        let err = RatingError::WinnerNotParticipant {
            winner: "carol".to_string(),
            player1: "alice".to_string(),
            player2: "bob".to_string(),
            event: "TFC_2".to_string(),
        };
        assert_eq!(err.to_string(), "winner \"carol\" is not a participant of alice vs bob (TFC_2)");
    }
}
