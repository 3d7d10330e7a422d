use std::collections::BTreeSet;

use crate::record::MonsterRecord;

/// Active filters. An empty query or set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the display name.
    pub query: String,
    /// Creature types; a record matches if its type is any of them.
    pub types: BTreeSet<String>,
    /// Normalized display ratings, e.g. `1/4`.
    pub challenge_ratings: BTreeSet<String>,
    /// Source tags, e.g. `monster-manual`.
    pub sources: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_challenge_ratings<I, S>(mut self, ratings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.challenge_ratings
            .extend(ratings.into_iter().map(Into::into));
        self
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Flips a type filter on or off. Returns whether it is now active.
    pub fn toggle_type(&mut self, creature_type: &str) -> bool {
        toggle(&mut self.types, creature_type)
    }

    pub fn toggle_challenge_rating(&mut self, rating: &str) -> bool {
        toggle(&mut self.challenge_ratings, rating)
    }

    pub fn toggle_source(&mut self, source: &str) -> bool {
        toggle(&mut self.sources, source)
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.types.is_empty()
            && self.challenge_ratings.is_empty()
            && self.sources.is_empty()
    }

    pub fn matches(&self, record: &MonsterRecord) -> bool {
        self.matches_folded(record, &self.query.to_lowercase())
    }

    fn matches_folded(&self, record: &MonsterRecord, query: &str) -> bool {
        if !query.is_empty() && !record.display_name().to_lowercase().contains(query) {
            return false;
        }
        if !self.types.is_empty()
            && !record
                .creature_type()
                .is_some_and(|t| self.types.contains(t))
        {
            return false;
        }
        if !self.challenge_ratings.is_empty()
            && !self.challenge_ratings.contains(&record.challenge().display)
        {
            return false;
        }
        if !self.sources.is_empty()
            && !record.source().is_some_and(|s| self.sources.contains(s))
        {
            return false;
        }
        true
    }
}

/// The records passing `criteria`, in their original relative order.
pub fn apply<'a>(
    records: &'a [MonsterRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a MonsterRecord> {
    let query = criteria.query.to_lowercase();
    records
        .iter()
        .filter(|record| criteria.matches_folded(record, &query))
        .collect()
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}
