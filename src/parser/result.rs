use crate::domain::{match_result_phrase, OutcomeKind};
use crate::errors::ParseError;

/// Winner and outcome decided by a report's result section
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub winner: Option<String>,
    pub kind: OutcomeKind,
}

impl Verdict {
    pub fn undocumented() -> Self {
        Self {
            winner: None,
            kind: OutcomeKind::Undocumented,
        }
    }
}

/// Interpret the final line of a result block against the closed phrase table
pub fn interpret_result_line(line: &str, player1: &str, player2: &str) -> Result<Verdict, ParseError> {
    let phrase = match_result_phrase(line).ok_or_else(|| ParseError::UnknownOutcomePhrase {
        line: line.to_string(),
    })?;

    match (phrase.leading_name, phrase.kind.is_decisive()) {
        (Some(leading), true) => {
            let winner = resolve_winner(&leading, player1, player2)?;
            Ok(Verdict {
                winner: Some(winner),
                kind: phrase.kind,
            })
        }
        (None, true) => Err(ambiguous("", player1, player2)),
        (Some(_), false) => Err(ParseError::UnknownOutcomePhrase {
            line: line.to_string(),
        }),
        (None, false) => Ok(Verdict {
            winner: None,
            kind: phrase.kind,
        }),
    }
}

/// Match a declared winner against the two participants.
///
/// The whole leading text is tried first, then its first token.
pub fn resolve_winner(leading: &str, player1: &str, player2: &str) -> Result<String, ParseError> {
    let leading = leading.trim();
    let first_token = leading.split_whitespace().next().unwrap_or("");

    [leading, first_token]
        .into_iter()
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| {
            [player1, player2]
                .into_iter()
                .find(|player| player.to_lowercase() == candidate.to_lowercase())
        })
        .map(str::to_lowercase)
        .ok_or_else(|| ambiguous(leading, player1, player2))
}

fn ambiguous(winner: &str, player1: &str, player2: &str) -> ParseError {
    ParseError::AmbiguousWinner {
        winner: winner.to_lowercase(),
        player1: player1.to_string(),
        player2: player2.to_string(),
    }
}
