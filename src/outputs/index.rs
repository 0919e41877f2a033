//! Persistent digest index maintenance.
//!
//! The index is a single JSON file holding an array of
//! [`IndexEntry`](crate::models::IndexEntry) records, newest first — the
//! consuming site displays it reverse-chronologically, so new dates are
//! prepended, never appended. An entry whose date already exists is replaced
//! in place, which keeps same-day reruns from duplicating records.
//!
//! The file is read and rewritten whole on every update; a missing file is an
//! empty index, not an error. Concurrent writers are out of scope (the
//! pipeline is scheduled at most once at a time).

use std::path::Path;

use tokio::fs;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::models::IndexEntry;

/// Load the index, treating a missing file as empty.
///
/// A file that exists but does not parse is reported as corrupt rather than
/// silently truncated to empty, so a bad deploy cannot wipe history.
pub async fn load_index(index_file: &Path) -> Result<Vec<IndexEntry>> {
    match fs::read_to_string(index_file).await {
        Ok(raw) => {
            let entries = serde_json::from_str(&raw).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("index file {} is corrupt: {e}", index_file.display()),
                )
            })?;
            Ok(entries)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %index_file.display(), "Index file absent; starting empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Upsert one entry by date and rewrite the index.
///
/// Matching date: replaced in place, position and length unchanged.
/// New date: inserted at the head. Idempotent under repetition.
#[instrument(level = "info", skip_all, fields(path = %index_file.display(), date = %entry.date))]
pub async fn upsert_entry(index_file: &Path, entry: IndexEntry) -> Result<()> {
    let mut entries = load_index(index_file).await?;

    match entries.iter_mut().find(|existing| existing.date == entry.date) {
        Some(existing) => {
            info!("Replacing existing index entry for date");
            *existing = entry;
        }
        None => {
            info!("Prepending new index entry");
            entries.insert(0, entry);
        }
    }

    if let Some(parent) = index_file.parent() {
        fs::create_dir_all(parent).await?;
    }
    let mut json = serde_json::to_string_pretty(&entries).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    json.push('\n');
    fs::write(index_file, json).await?;
    info!(count = entries.len(), "Wrote index file");
    Ok(())
}
