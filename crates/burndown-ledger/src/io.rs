//! JSONL I/O and atomic file operations

use crate::types::{RawSnapshot, Snapshot, SnapshotLog};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Records read from a JSONL file plus the count of lines that failed to parse
#[derive(Debug)]
pub struct JsonlRead<T> {
    pub records: Vec<T>,
    pub malformed: usize,
}

impl<T> Default for JsonlRead<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            malformed: 0,
        }
    }
}

/// Append a JSON record to a JSONL file
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let json = serde_json::to_string(record)?;
    writeln!(file, "{}", json)?;
    Ok(())
}

/// Read all records from a JSONL file. A missing file reads as empty.
pub fn read_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<JsonlRead<T>> {
    if !path.exists() {
        return Ok(JsonlRead::default());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut read = JsonlRead::default();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => read.records.push(record),
            Err(_) => read.malformed += 1,
        }
    }

    Ok(read)
}

/// Rewrite a JSONL file atomically with the given records
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> std::io::Result<()> {
    let mut buf = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buf, record)?;
        buf.push(b'\n');
    }
    atomic_write(path, &buf)
}

/// Read and validate the snapshot ledger.
///
/// Unparseable lines and records missing `itemId`/`observedAt` are both
/// counted in [`SnapshotLog::skipped`].
pub fn read_snapshot_log(path: &Path) -> std::io::Result<SnapshotLog> {
    let read: JsonlRead<RawSnapshot> = read_jsonl(path)?;
    let mut log = SnapshotLog::from_raw(read.records);
    log.skipped += read.malformed;

    if log.skipped > 0 {
        tracing::warn!(
            skipped = log.skipped,
            path = %path.display(),
            "skipped malformed snapshot records"
        );
    }
    tracing::debug!(snapshots = log.len(), "loaded snapshot ledger");
    Ok(log)
}

/// Append validated snapshots to the ledger
pub fn append_snapshots(path: &Path, snapshots: &[Snapshot]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for snapshot in snapshots {
        let json = serde_json::to_string(snapshot)?;
        writeln!(file, "{}", json)?;
    }
    Ok(())
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
