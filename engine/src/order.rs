use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::record::MonsterRecord;

/// Challenge rating ascending with unparsable ratings last, then display name.
pub fn compare(a: &MonsterRecord, b: &MonsterRecord) -> Ordering {
    let by_name = || compare_names(a.display_name(), b.display_name());
    match (a.challenge().value, b.challenge().value) {
        (None, None) => by_name(),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        // Values are never NaN, so partial_cmp always answers; -0 and 0 tie.
        (Some(x), Some(y)) => x
            .partial_cmp(&y)
            .unwrap_or(Ordering::Equal)
            .then_with(by_name),
    }
}

/// Stable sort with [`compare`].
pub fn sort_records(records: &mut [MonsterRecord]) {
    records.sort_by(compare);
}

/// Name order in the manner of a locale collation: letters compare without
/// accents or case first, then unaccented before accented, then lowercase
/// before uppercase. Distinct names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.nfd().cmp(a.nfd()))
        .then_with(|| b.cmp(a))
}

// Decomposed and lowercased with combining marks dropped, so `É` reads as `e`.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
