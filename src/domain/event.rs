use std::cmp::Ordering;

/// Chronological sort key of an event, taken from its numeric suffix (`TFC_21` → 21)
///
/// Events without a suffix sort after every numbered event, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKey {
    number: Option<u64>,
    name: String,
}

impl EventKey {
    pub fn new(event_name: &str) -> Self {
        Self {
            number: numeric_suffix(event_name),
            name: event_name.to_string(),
        }
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn numeric_suffix(event_name: &str) -> Option<u64> {
    let trimmed = event_name.trim();
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(idx, _)| idx)?;
    trimmed[digits_start..].parse().ok()
}

/// Sort event names chronologically
pub fn sort_events(events: &mut [String]) {
    events.sort_by_cached_key(|name| EventKey::new(name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering_not_lexical() {
        let mut events = vec!["TFC_10".to_string(), "TFC_2".to_string(), "TFC_1".to_string()];
        sort_events(&mut events);
        assert_eq!(events, vec!["TFC_1", "TFC_2", "TFC_10"]);
    }

    #[test]
    fn test_unnumbered_events_sort_last() {
        assert!(EventKey::new("TFC_99") < EventKey::new("Exhibition"));
        assert!(EventKey::new("Exhibition") < EventKey::new("Showcase"));
        assert_eq!(EventKey::new("Exhibition").number(), None);
    }

    #[test]
    fn test_suffix_parsing() {
        assert_eq!(EventKey::new("TFC_22").number(), Some(22));
        assert_eq!(EventKey::new("Cup3").number(), Some(3));
    }
}
