pub mod era;
pub mod event;
pub mod models;
pub mod outcome;
mod profile;

pub use era::{classify_keys, EraReport, FormatEra};
pub use event::{sort_events, EventKey};
pub use models::*;
pub use outcome::{match_result_phrase, OutcomeKind, ResultPhrase};
pub use profile::PlayerProfile;
