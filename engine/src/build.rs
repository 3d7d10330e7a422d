//! Flattening per-monster source files into the combined collection and the
//! name/file index.
//!
//! Both builders run over every file independently. A file that fails to parse
//! is logged and named after its file; it is never dropped and never aborts the
//! batch.

use tracing::{debug, info, warn};

use crate::record::{declared_name, fallback_name, IndexEntry, MonsterRecord, RawFile};

/// Builds one index entry per file, in input order.
pub fn build_index(files: &[RawFile]) -> Vec<IndexEntry> {
    build_index_with(files, fallback_name)
}

pub fn build_index_with(
    files: &[RawFile],
    fallback: impl Fn(&str) -> String,
) -> Vec<IndexEntry> {
    let entries: Vec<IndexEntry> = files
        .iter()
        .map(|raw| {
            let name = match raw.parse() {
                Ok(fields) => declared_name(&fields)
                    .map(str::to_owned)
                    .unwrap_or_else(|| fallback(&raw.file)),
                Err(err) => {
                    warn!(
                        file = %raw.file,
                        error = %err,
                        "could not read record, using file name only"
                    );
                    fallback(&raw.file)
                }
            };
            debug!(file = %raw.file, %name, "indexed");
            IndexEntry {
                name,
                file: raw.file.clone(),
            }
        })
        .collect();
    info!(count = entries.len(), "built index");
    entries
}

/// Annotates every file with its file reference and display name, in input order.
pub fn aggregate(files: &[RawFile]) -> Vec<MonsterRecord> {
    aggregate_with(files, fallback_name)
}

pub fn aggregate_with(
    files: &[RawFile],
    fallback: impl Fn(&str) -> String,
) -> Vec<MonsterRecord> {
    let records: Vec<MonsterRecord> = files
        .iter()
        .map(|raw| match raw.parse() {
            Ok(fields) => MonsterRecord::from_fields(raw.file.as_str(), fields, &fallback),
            Err(err) => {
                warn!(
                    file = %raw.file,
                    error = %err,
                    "could not read record, keeping file name only"
                );
                MonsterRecord::malformed(raw.file.as_str(), &fallback)
            }
        })
        .collect();
    info!(count = records.len(), "aggregated monsters");
    records
}
