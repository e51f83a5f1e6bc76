use std::collections::BTreeSet;

/// Report format generation, recognised from the stat keys a report declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatEra {
    Legacy,
    Modern,
    Unknown,
}

impl FormatEra {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatEra::Legacy => "legacy",
            FormatEra::Modern => "modern",
            FormatEra::Unknown => "unknown",
        }
    }
}

const LEGACY_FIGHT_KEYS: &[&str] = &[
    "strikes landed",
    "strikes thrown",
    "strikes absorbed",
    "accuracy",
    "knockdowns",
    "striking differential",
    "takedowns finished",
    "takedowns attempted",
    "takedown accuracy",
    "takedowns defended",
    "times taken down",
    "takedown defense rate",
    "submissions attempted",
];

const MODERN_FIGHT_KEYS: &[&str] = &[
    "strikes landed",
    "strikes thrown",
    "accuracy",
    "strikes absorbed",
    "strikes defended",
    "strike defense rate",
    "knockdowns",
    "knocked down",
    "striking differential",
    "takedowns finished",
    "takedowns attempted",
    "takedown accuracy",
    "takedowns defended",
    "times taken down",
    "takedown defense rate",
    "submissions attempted",
];

/// How a key set compares with the closest era table
#[derive(Debug, Clone, PartialEq)]
pub struct EraReport {
    pub era: FormatEra,
    pub missing: BTreeSet<String>,
    pub extra: BTreeSet<String>,
}

impl EraReport {
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Pick the era table with the smallest symmetric difference; ties are Unknown
pub fn classify_keys<'a, I>(keys: I) -> EraReport
where
    I: IntoIterator<Item = &'a str>,
{
    let keys: BTreeSet<String> = keys.into_iter().map(str::to_lowercase).collect();
    let (legacy_missing, legacy_extra) = diff_against(&keys, LEGACY_FIGHT_KEYS);
    let (modern_missing, modern_extra) = diff_against(&keys, MODERN_FIGHT_KEYS);

    let legacy_diff = legacy_missing.len() + legacy_extra.len();
    let modern_diff = modern_missing.len() + modern_extra.len();

    if keys.is_empty() || legacy_diff == modern_diff {
        EraReport {
            era: FormatEra::Unknown,
            missing: legacy_missing.union(&modern_missing).cloned().collect(),
            extra: legacy_extra.union(&modern_extra).cloned().collect(),
        }
    } else if legacy_diff < modern_diff {
        EraReport {
            era: FormatEra::Legacy,
            missing: legacy_missing,
            extra: legacy_extra,
        }
    } else {
        EraReport {
            era: FormatEra::Modern,
            missing: modern_missing,
            extra: modern_extra,
        }
    }
}

fn diff_against(keys: &BTreeSet<String>, table: &[&str]) -> (BTreeSet<String>, BTreeSet<String>) {
    let expected: BTreeSet<String> = table.iter().map(|k| k.to_string()).collect();
    let missing = expected.difference(keys).cloned().collect();
    let extra = keys.difference(&expected).cloned().collect();
    (missing, extra)
}
