//! Snapshot ledger types, JSONL I/O and path resolution

mod dedupe;
mod io;
mod paths;
mod types;

pub use dedupe::remove_duplicates;
pub use io::{
    append_jsonl, append_snapshots, atomic_write, read_jsonl, read_snapshot_log, write_jsonl,
    JsonlRead,
};
pub use paths::Paths;
pub use types::{parse_timestamp, ItemId, RawSnapshot, Snapshot, SnapshotLog};
