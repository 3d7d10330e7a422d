use std::sync::LazyLock;

use regex::Regex;

/// First parenthesised annotation, e.g. `(Legendary)` or `(100 XP)`.
static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

/// Decimal literal at the start of the text. `f64::from_str` alone would also
/// take `inf` and `nan`, which are not ratings.
static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?").unwrap()
});

/// The same literal spanning the whole text, for the sides of a fraction.
static WHOLE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap()
});

/// Display value for a record that carries no challenge rating.
pub const UNKNOWN_DISPLAY: &str = "?";

/// A challenge rating decoded once per record: the trimmed display text and
/// the numeric value used for ordering (`None` when the text does not parse).
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeRating {
    pub display: String,
    pub value: Option<f64>,
}

impl ChallengeRating {
    pub fn from_raw(raw: Option<&str>) -> Self {
        Self {
            display: normalize_display(raw),
            value: parse_numeric(raw),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for ChallengeRating {
    fn default() -> Self {
        Self::from_raw(None)
    }
}

/// Numeric value of a challenge rating such as `"1/4"`, `"0"` or `"5 (Legendary)"`.
///
/// Absent or empty input, a fraction with a zero or unreadable denominator,
/// and text without a leading number all yield `None`.
pub fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let stripped = strip_annotation(raw);
    let cr = stripped.trim();
    if cr == "0" {
        return Some(0.0);
    }
    if cr.contains('/') {
        let mut parts = cr.split('/');
        let num = parts.next().and_then(whole_number);
        let den = parts.next().and_then(whole_number);
        return match (num, den) {
            (Some(n), Some(d)) if d != 0.0 => Some(n / d).filter(|v| !v.is_nan()),
            _ => None,
        };
    }
    leading_float(cr)
}

/// Display form of a challenge rating: annotation removed, whitespace trimmed,
/// `"?"` when absent.
pub fn normalize_display(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.is_empty() => strip_annotation(s).trim().to_string(),
        _ => UNKNOWN_DISPLAY.to_string(),
    }
}

/// Removes the first `( ... )` group. Only the first group goes; a later one
/// stays in the text.
pub fn strip_annotation(raw: &str) -> String {
    ANNOTATION_RE.replace(raw, "").into_owned()
}

// One side of a fraction: the whole (trimmed) text must be a number, and an
// empty side reads as zero.
fn whole_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    WHOLE_NUMBER_RE.is_match(s).then(|| s.parse().ok()).flatten()
}

// Longest leading decimal literal, so "5 or 6" reads as 5.
fn leading_float(s: &str) -> Option<f64> {
    LEADING_FLOAT_RE.find(s)?.as_str().parse().ok()
}
