use bestiary_engine::record::{fallback_name, format_score, parse_object};
use bestiary_engine::{ability_mod, Ability, MonsterRecord, RecordError};
use serde_json::json;

#[test]
fn ability_mod_rounds_down() {
    assert_eq!(ability_mod(8), -1);
    assert_eq!(ability_mod(9), -1);
    assert_eq!(ability_mod(10), 0);
    assert_eq!(ability_mod(11), 0);
    assert_eq!(ability_mod(15), 2);
}

#[test]
fn scores_format_with_signed_modifier() {
    assert_eq!(format_score(14), "14 (+2)");
    assert_eq!(format_score(10), "10 (+0)");
    assert_eq!(format_score(7), "7 (-2)");
}

#[test]
fn fallback_strips_first_json_extension() {
    assert_eq!(fallback_name("goblin.json"), "goblin");
    assert_eq!(fallback_name("adult-red-dragon.json"), "adult-red-dragon");
}

#[test]
fn derived_fields() {
    let m = MonsterRecord::from_json(
        "goblin.json",
        &json!({
            "name": "Goblin",
            "type": "humanoid",
            "ac": 15,
            "cr": "1/4",
            "abilities": { "str": 8, "DEX": 14, "wis": "high" },
            "tags": ["humanoid", "goblinoid", "monster-manual"]
        }),
    )
    .unwrap();
    assert_eq!(m.file(), "goblin.json");
    assert_eq!(m.display_name(), "Goblin");
    assert_eq!(m.creature_type(), Some("humanoid"));
    assert_eq!(m.source(), Some("monster-manual"));
    assert_eq!(m.tags().len(), 3);
    assert_eq!(m.challenge().value, Some(0.25));
    assert_eq!(m.abilities().score(Ability::Dex), Some(14));
    assert_eq!(m.abilities().modifier(Ability::Str), Some(-1));
    assert_eq!(m.abilities().score(Ability::Wis), None);
    assert_eq!(m.field_text("ac").as_deref(), Some("15"));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let m = MonsterRecord::from_json("mystery.json", &json!({})).unwrap();
    assert_eq!(m.display_name(), "mystery");
    assert_eq!(m.name(), None);
    assert_eq!(m.challenge().display, "?");
    assert!(!m.challenge().is_parsed());
    assert!(m.tags().is_empty());
    assert_eq!(m.source(), None);
    assert!(m.abilities().is_empty());
}

#[test]
fn numeric_rating_is_read_as_text() {
    let m = MonsterRecord::from_json("imp.json", &json!({ "cr": 1 })).unwrap();
    assert_eq!(m.challenge().display, "1");
    assert_eq!(m.challenge().value, Some(1.0));
}

#[test]
fn combined_form_round_trips() {
    let m = MonsterRecord::from_json("orc.json", &json!({ "name": "Orc", "cr": "1/2" })).unwrap();
    let text = serde_json::to_string(&m).unwrap();
    assert_eq!(
        text,
        r#"{"name":"Orc","cr":"1/2","_file":"orc.json","_displayName":"Orc"}"#
    );
    let back: MonsterRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, m);
}

#[test]
fn non_objects_are_rejected() {
    assert!(matches!(
        parse_object("[1]"),
        Err(RecordError::NotAnObject("an array"))
    ));
    assert!(matches!(parse_object("{"), Err(RecordError::Json(_))));
    assert!(MonsterRecord::from_json("x.json", &json!("text")).is_err());
}
