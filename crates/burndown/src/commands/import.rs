use super::Context;
use burndown_ledger::{append_snapshots, read_jsonl, JsonlRead, RawSnapshot, SnapshotLog};
use std::path::Path;

pub fn run(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("import file not found: {}", file.display());
    }

    let log = parse_export(file)?;
    append_snapshots(&ctx.paths.ledger_file(), &log.snapshots)?;

    tracing::info!(
        imported = log.len(),
        skipped = log.skipped,
        ledger = %ctx.paths.ledger_file().display(),
        "imported snapshots"
    );
    println!(
        "Imported {} snapshots ({} skipped as malformed)",
        log.len(),
        log.skipped
    );
    Ok(())
}

/// Read an export: `.jsonl` one record per line, anything else a JSON array
fn parse_export(file: &Path) -> anyhow::Result<SnapshotLog> {
    if file.extension().and_then(|e| e.to_str()) == Some("jsonl") {
        let read: JsonlRead<RawSnapshot> = read_jsonl(file)?;
        let mut log = SnapshotLog::from_raw(read.records);
        log.skipped += read.malformed;
        return Ok(log);
    }

    let content = std::fs::read_to_string(file)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)?;
    let total = values.len();
    let raw: Vec<RawSnapshot> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    let unreadable = total - raw.len();

    let mut log = SnapshotLog::from_raw(raw);
    log.skipped += unreadable;
    Ok(log)
}
