use std::sync::Arc;

use super::event::EventKey;
use super::models::MatchRecord;

/// A player and every match they appear in, in insertion order
#[derive(Debug, Clone)]
pub struct PlayerProfile {
    name: String,
    matches: Vec<Arc<MatchRecord>>,
}

impl PlayerProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            matches: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends without any safety checks; the store guarantees participation
    pub fn add_match(&mut self, record: Arc<MatchRecord>) {
        self.matches.push(record);
    }

    pub fn matches(&self) -> &[Arc<MatchRecord>] {
        &self.matches
    }

    /// Matches optionally filtered by event name
    pub fn matches_in(&self, event_name: Option<&str>) -> Vec<&Arc<MatchRecord>> {
        self.matches
            .iter()
            .filter(|m| event_name.is_none_or(|event| m.event_name == event))
            .collect()
    }

    /// Matches sorted by event; insertion order is kept within an event
    pub fn chronological(&self) -> Vec<&Arc<MatchRecord>> {
        let mut matches: Vec<&Arc<MatchRecord>> = self.matches.iter().collect();
        matches.sort_by_cached_key(|m| EventKey::new(&m.event_name));
        matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl PartialEq for PlayerProfile {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for PlayerProfile {}
