use std::fmt;

/// Closed classification of how a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Decision,
    Tko,
    Submission,
    Forfeit,
    Draw,
    Undocumented,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 6] = [
        OutcomeKind::Decision,
        OutcomeKind::Tko,
        OutcomeKind::Submission,
        OutcomeKind::Forfeit,
        OutcomeKind::Draw,
        OutcomeKind::Undocumented,
    ];

    /// Tag appended to the `Result` list of structured reports
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Decision => "DECISION",
            OutcomeKind::Tko => "TKO",
            OutcomeKind::Submission => "SUBMISSION",
            OutcomeKind::Forfeit => "FORFEIT",
            OutcomeKind::Draw => "DRAW",
            OutcomeKind::Undocumented => "UNDOCUMENTED",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Decisive outcomes must name a winner
    pub fn is_decisive(&self) -> bool {
        !matches!(self, OutcomeKind::Draw | OutcomeKind::Undocumented)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal phrases of a result line. Draw and decision sub-kinds collapse into one kind.
const OUTCOME_PHRASES: &[(&str, OutcomeKind)] = &[
    ("via decision.", OutcomeKind::Decision),
    ("via unanimous decision.", OutcomeKind::Decision),
    ("via split decision.", OutcomeKind::Decision),
    ("via majority decision.", OutcomeKind::Decision),
    ("via submission.", OutcomeKind::Submission),
    ("via tko.", OutcomeKind::Tko),
    ("via forfeit.", OutcomeKind::Forfeit),
    ("draw.", OutcomeKind::Draw),
    ("unanimous draw.", OutcomeKind::Draw),
    ("split draw.", OutcomeKind::Draw),
    ("majority draw.", OutcomeKind::Draw),
    ("undocumented.", OutcomeKind::Undocumented),
];

/// A result line split into its leading name (if any) and its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPhrase {
    pub leading_name: Option<String>,
    pub kind: OutcomeKind,
}

/// Match the end of `line` against the phrase table, longest phrase first
pub fn match_result_phrase(line: &str) -> Option<ResultPhrase> {
    let lowered = line.trim().to_lowercase();

    let (phrase, kind) = OUTCOME_PHRASES
        .iter()
        .filter(|(phrase, _)| ends_with_phrase(&lowered, phrase))
        .max_by_key(|(phrase, _)| phrase.len())?;

    let leading = lowered[..lowered.len() - phrase.len()].trim();
    let leading_name = (!leading.is_empty()).then(|| leading.to_string());

    Some(ResultPhrase {
        leading_name,
        kind: *kind,
    })
}

/// The phrase must be the whole line or follow a whitespace boundary
fn ends_with_phrase(line: &str, phrase: &str) -> bool {
    if !line.ends_with(phrase) {
        return false;
    }
    let rest = &line[..line.len() - phrase.len()];
    rest.is_empty() || rest.ends_with(char::is_whitespace)
}
