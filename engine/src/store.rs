//! Reading the record directory and reading/writing the generated files.

use std::{fs, path::Path};

use encoding_rs::Encoding;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Compendium;
use crate::error::{LoadError, StoreError};
use crate::record::{IndexEntry, MonsterRecord, RawFile};

/// Lists the `*.json` files of `dir`, sorted by name, skipping `exclude`
/// (the generated files). Only an unreadable directory is an error; a file
/// that cannot be read comes back empty and is handled as malformed.
pub fn read_record_dir(dir: &Path, exclude: &[&str]) -> Result<Vec<RawFile>, StoreError> {
    let unreadable = |source: std::io::Error| StoreError::DirUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "skipping file with a non UTF-8 name");
            continue;
        };
        if !name.ends_with(".json") || exclude.contains(&name.as_str()) {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            debug!(%name, "skipping directory");
            continue;
        }
        names.push(name);
    }
    names.sort();

    let files: Vec<RawFile> = names
        .into_iter()
        .map(|name| {
            let path = dir.join(&name);
            let contents = match fs::read(&path) {
                Ok(bytes) => decode_text(&bytes).unwrap_or_else(|| {
                    warn!(file = %name, "file is not valid UTF-8");
                    String::new()
                }),
                Err(err) => {
                    warn!(file = %name, error = %err, "could not read file");
                    String::new()
                }
            };
            RawFile::new(name, contents)
        })
        .collect();
    info!(dir = %dir.display(), count = files.len(), "read record directory");
    Ok(files)
}

/// Decodes file bytes, honouring a UTF-8/UTF-16 byte order mark.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Some(cow.into_owned())
    } else {
        String::from_utf8(bytes.to_vec()).ok()
    }
}

/// Pretty JSON with two-space indentation and no trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn write_combined(path: &Path, records: &[MonsterRecord]) -> Result<(), StoreError> {
    write_json(path, records)?;
    info!(path = %path.display(), count = records.len(), "wrote combined file");
    Ok(())
}

pub fn write_index(path: &Path, entries: &[IndexEntry]) -> Result<(), StoreError> {
    write_json(path, entries)?;
    info!(path = %path.display(), count = entries.len(), "wrote index");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let text = to_pretty_json(value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the combined file into a sorted session collection. Any failure
/// leaves no collection at all.
pub fn load_compendium(path: &Path) -> Result<Compendium, LoadError> {
    let records: Vec<MonsterRecord> = load_json(path)?;
    info!(path = %path.display(), count = records.len(), "loaded monsters");
    Ok(Compendium::from_records(records))
}

pub fn load_index(path: &Path) -> Result<Vec<IndexEntry>, LoadError> {
    load_json(path)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(&bytes).unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
