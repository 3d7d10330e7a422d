use indexmap::IndexMap;
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::ability_mod;
use crate::challenge::ChallengeRating;
use crate::error::RecordError;

/// Key under which the combined file stores a record's source file name.
pub const FILE_KEY: &str = "_file";
/// Key under which the combined file stores a record's resolved name.
pub const DISPLAY_NAME_KEY: &str = "_displayName";

/// A record's JSON object, in the key order it was written with.
pub type Fields = IndexMap<String, Value>;

/// One per-monster source file, read but not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub file: String,
    pub contents: String,
}

impl RawFile {
    pub fn new(file: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }

    pub fn parse(&self) -> Result<Fields, RecordError> {
        parse_object(&self.contents)
    }
}

/// Parses a source file's text; anything but a JSON object is malformed.
pub fn parse_object(text: &str) -> Result<Fields, RecordError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(RecordError::NotAnObject(json_kind(&other))),
    }
}

/// Name derived from the file name: `goblin.json` → `goblin`.
pub fn fallback_name(file: &str) -> String {
    file.replacen(".json", "", 1)
}

/// Entry of the lightweight index written next to the record files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub fn code(self) -> &'static str {
        match self {
            Ability::Str => "str",
            Ability::Dex => "dex",
            Ability::Con => "con",
            Ability::Int => "int",
            Ability::Wis => "wis",
            Ability::Cha => "cha",
        }
    }
}

/// Ability scores keyed by their lowercase code, in record order. Entries whose
/// value is not an integer are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityScores(IndexMap<String, i32>);

impl AbilityScores {
    fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self(
            map.iter()
                .filter_map(|(code, score)| {
                    let score = i32::try_from(score.as_i64()?).ok()?;
                    Some((code.to_lowercase(), score))
                })
                .collect(),
        )
    }

    pub fn score(&self, ability: Ability) -> Option<i32> {
        self.0.get(ability.code()).copied()
    }

    pub fn modifier(&self, ability: Ability) -> Option<i32> {
        self.score(ability).map(ability_mod)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(code, score)| (code.as_str(), *score))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `14` → `14 (+2)`.
pub fn format_score(score: i32) -> String {
    format!("{} ({:+})", score, ability_mod(score))
}

/// A monster as the session sees it: the pass-through JSON object plus the
/// values derived from it once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterRecord {
    file: String,
    display_name: String,
    tags: Vec<String>,
    source: Option<String>,
    abilities: AbilityScores,
    challenge: ChallengeRating,
    fields: Fields,
}

impl MonsterRecord {
    /// Annotates a parsed source object. Stale `_file` / `_displayName` keys in
    /// the source are replaced.
    pub fn from_fields(
        file: impl Into<String>,
        mut fields: Fields,
        fallback: impl Fn(&str) -> String,
    ) -> Self {
        let file = file.into();
        fields.shift_remove(FILE_KEY);
        fields.shift_remove(DISPLAY_NAME_KEY);
        let display_name = declared_name(&fields)
            .map(str::to_owned)
            .unwrap_or_else(|| fallback(&file));
        Self::derive(file, display_name, fields)
    }

    /// Stand-in for a source file that did not parse.
    pub fn malformed(file: impl Into<String>, fallback: impl Fn(&str) -> String) -> Self {
        let file = file.into();
        let display_name = fallback(&file);
        Self::derive(file, display_name, Fields::new())
    }

    pub fn from_json(file: impl Into<String>, value: &Value) -> Result<Self, RecordError> {
        let fields = match value {
            Value::Object(map) => map.clone().into_iter().collect(),
            other => return Err(RecordError::NotAnObject(json_kind(other))),
        };
        Ok(Self::from_fields(file, fields, fallback_name))
    }

    /// Rebuilds a record from its combined-file form.
    pub fn from_combined(mut fields: Fields) -> Result<Self, RecordError> {
        let file = match fields.shift_remove(FILE_KEY) {
            Some(Value::String(file)) => file,
            _ => return Err(RecordError::MissingFileRef),
        };
        let display_name = match fields.shift_remove(DISPLAY_NAME_KEY) {
            Some(Value::String(name)) if !name.is_empty() => name,
            _ => declared_name(&fields)
                .map(str::to_owned)
                .unwrap_or_else(|| fallback_name(&file)),
        };
        Ok(Self::derive(file, display_name, fields))
    }

    fn derive(file: String, display_name: String, fields: Fields) -> Self {
        let tags: Vec<String> = match fields.get("tags") {
            Some(Value::Array(items)) => items.iter().map(value_text).collect(),
            _ => Vec::new(),
        };
        let source = tags.last().cloned();
        let abilities = fields
            .get("abilities")
            .map(AbilityScores::from_value)
            .unwrap_or_default();
        let challenge = ChallengeRating::from_raw(text_field(&fields, "cr").as_deref());
        Self {
            file,
            display_name,
            tags,
            source,
            abilities,
            challenge,
            fields,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn name(&self) -> Option<&str> {
        declared_name(&self.fields)
    }

    pub fn creature_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Last tag, by convention the source book.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn challenge(&self) -> &ChallengeRating {
        &self.challenge
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A string or number field as text.
    pub fn field_text(&self, key: &str) -> Option<String> {
        text_field(&self.fields, key)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            name: self.display_name.clone(),
            file: self.file.clone(),
        }
    }
}

impl Serialize for MonsterRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(FILE_KEY, &self.file)?;
        map.serialize_entry(DISPLAY_NAME_KEY, &self.display_name)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonsterRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Fields::deserialize(deserializer)?;
        Self::from_combined(fields).map_err(de::Error::custom)
    }
}

pub(crate) fn declared_name(fields: &Fields) -> Option<&str> {
    fields
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

fn text_field(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
