use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::filter::{apply, FilterCriteria};
use crate::order::sort_records;
use crate::record::MonsterRecord;

/// Creature types offered as filters, whatever the loaded records contain.
pub const CREATURE_TYPES: [&str; 14] = [
    "aberration",
    "beast",
    "celestial",
    "construct",
    "dragon",
    "elemental",
    "fey",
    "fiend",
    "giant",
    "humanoid",
    "monstrosity",
    "ooze",
    "plant",
    "undead",
];

/// Heading key for records whose rating does not parse.
pub const UNDEFINED_GROUP: &str = "Undefined";

/// The monsters of one session, sorted once at load and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Compendium {
    records: Vec<MonsterRecord>,
}

impl Compendium {
    pub fn from_records(mut records: Vec<MonsterRecord>) -> Self {
        sort_records(&mut records);
        Self { records }
    }

    pub fn records(&self) -> &[MonsterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&MonsterRecord> {
        apply(&self.records, criteria)
    }

    pub fn find(&self, file: &str) -> Option<&MonsterRecord> {
        self.records.iter().find(|m| m.file() == file)
    }

    pub fn find_by_name(&self, display_name: &str) -> Option<&MonsterRecord> {
        self.records
            .iter()
            .find(|m| m.display_name() == display_name)
    }

    pub fn facets(&self) -> Facets {
        let mut ratings: Vec<(&str, f64)> = Vec::new();
        for record in &self.records {
            let cr = record.challenge();
            if let Some(value) = cr.value {
                if !cr.display.is_empty() && !ratings.iter().any(|(d, _)| *d == cr.display) {
                    ratings.push((cr.display.as_str(), value));
                }
            }
        }
        ratings.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let sources: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(MonsterRecord::source)
            .filter(|s| !s.is_empty())
            .collect();

        Facets {
            types: CREATURE_TYPES.iter().map(|t| t.to_string()).collect(),
            challenge_ratings: ratings.into_iter().map(|(d, _)| d.to_string()).collect(),
            sources: sources
                .into_iter()
                .map(|value| SourceFacet {
                    label: format_source(value),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

/// Values a front end offers as filter toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    pub types: Vec<String>,
    /// Distinct parsable display ratings, numerically ascending.
    pub challenge_ratings: Vec<String>,
    pub sources: Vec<SourceFacet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFacet {
    pub value: String,
    pub label: String,
}

/// A run of consecutive records sharing a display rating.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeGroup<'a> {
    pub heading: String,
    pub records: Vec<&'a MonsterRecord>,
}

/// Splits an already sorted list wherever the display rating changes.
/// Unparsable ratings all land under `CR Undefined`.
pub fn group_by_challenge<'a>(records: &[&'a MonsterRecord]) -> Vec<ChallengeGroup<'a>> {
    let mut groups: Vec<ChallengeGroup<'a>> = Vec::new();
    let mut current: Option<&str> = None;
    for &record in records {
        let cr = record.challenge();
        let key = if cr.is_parsed() {
            cr.display.as_str()
        } else {
            UNDEFINED_GROUP
        };
        match groups.last_mut() {
            Some(group) if current == Some(key) => group.records.push(record),
            _ => {
                current = Some(key);
                groups.push(ChallengeGroup {
                    heading: format!("CR {key}"),
                    records: vec![record],
                });
            }
        }
    }
    groups
}

/// `monster-manual` → `Monster Manual`.
pub fn format_source(source: &str) -> String {
    source
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
