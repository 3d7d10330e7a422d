use std::fs;

use bestiary_engine::build::{aggregate, build_index};
use bestiary_engine::store::{
    decode_text, load_compendium, load_index, read_record_dir, to_pretty_json, write_combined,
    write_index,
};
use bestiary_engine::{LoadError, StoreError};

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("orc.json"), r#"{ "name": "Orc", "cr": "1/2" }"#).unwrap();
    fs::write(dir.path().join("goblin.json"), r#"{ "name": "Goblin", "cr": "1/4" }"#).unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(dir.path().join("monsters.json"), "[]").unwrap();
    fs::write(dir.path().join("index.json"), "[]").unwrap();
    dir
}

#[test]
fn directory_listing_is_sorted_and_skips_generated_files() {
    let dir = data_dir();
    let files = read_record_dir(dir.path(), &["monsters.json", "index.json"]).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(names, ["broken.json", "goblin.json", "orc.json"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = read_record_dir(&missing, &[]).unwrap_err();
    assert!(matches!(err, StoreError::DirUnreadable { .. }));
}

#[test]
fn bom_prefixed_files_decode() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(br#"{"name":"Imp"}"#);
    assert_eq!(decode_text(&bytes).as_deref(), Some(r#"{"name":"Imp"}"#));

    let utf16le: Vec<u8> = [0xFF, 0xFE]
        .into_iter()
        .chain("{}".encode_utf16().flat_map(u16::to_le_bytes))
        .collect();
    assert_eq!(decode_text(&utf16le).as_deref(), Some("{}"));

    assert_eq!(decode_text(&[0xC3, 0x28]), None);
}

#[test]
fn build_then_load_round_trips_sorted() {
    let dir = data_dir();
    let files = read_record_dir(dir.path(), &["monsters.json", "index.json"]).unwrap();
    let combined = dir.path().join("monsters.json");
    write_combined(&combined, &aggregate(&files)).unwrap();

    let compendium = load_compendium(&combined).unwrap();
    let names: Vec<_> = compendium.records().iter().map(|m| m.display_name()).collect();
    assert_eq!(names, ["Goblin", "Orc", "broken"]);
    assert_eq!(compendium.find("orc.json").unwrap().challenge().display, "1/2");
}

#[test]
fn rebuilding_writes_identical_bytes() {
    let dir = data_dir();
    let combined = dir.path().join("monsters.json");
    let build = || {
        let files = read_record_dir(dir.path(), &["monsters.json", "index.json"]).unwrap();
        write_combined(&combined, &aggregate(&files)).unwrap();
        fs::read(&combined).unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn index_file_format() {
    let dir = data_dir();
    let files = read_record_dir(dir.path(), &["monsters.json", "index.json"]).unwrap();
    let path = dir.path().join("index.json");
    write_index(&path, &build_index(&files)).unwrap();

    insta::assert_snapshot!(fs::read_to_string(&path).unwrap(), @r###"
    [
      {
        "name": "broken",
        "file": "broken.json"
      },
      {
        "name": "Goblin",
        "file": "goblin.json"
      },
      {
        "name": "Orc",
        "file": "orc.json"
      }
    ]
    "###);

    let entries = load_index(&path).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].name, "Goblin");
}

#[test]
fn empty_collections_serialize_as_empty_arrays() {
    assert_eq!(to_pretty_json(&aggregate(&[])).unwrap(), "[]");
}

#[test]
fn load_failures_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = load_compendium(&dir.path().join("monsters.json")).unwrap_err();
    assert!(matches!(missing, LoadError::Io { .. }));

    let garbled = dir.path().join("garbled.json");
    fs::write(&garbled, "{ \"not\": \"an array\" }").unwrap();
    let err = load_compendium(&garbled).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("garbled.json"));
}

#[test]
fn combined_records_without_file_ref_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monsters.json");
    fs::write(&path, r#"[{ "name": "Orphan" }]"#).unwrap();
    let err = load_compendium(&path).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}
