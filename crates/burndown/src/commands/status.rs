use super::Context;
use burndown_ledger::read_snapshot_log;
use std::collections::BTreeSet;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let ledger = ctx.paths.ledger_file();

    let mut output = serde_json::json!({
        "data_dir": ctx.paths.data_dir.display().to_string(),
        "initialized": ctx.paths.exists(),
        "settings": ctx.settings_path.exists(),
        "sprints": ctx.paths.sprints_file().exists(),
    });

    if ledger.exists() {
        let log = read_snapshot_log(&ledger)?;
        let sprints: BTreeSet<&str> = log.snapshots.iter().map(|s| s.sprint_name.as_str()).collect();
        let items: BTreeSet<_> = log.snapshots.iter().map(|s| &s.item_id).collect();
        let last = log.snapshots.iter().map(|s| s.observed_at).max();

        output["snapshots"] = serde_json::json!(log.len());
        output["skipped"] = serde_json::json!(log.skipped);
        output["items"] = serde_json::json!(items.len());
        output["sprint_names"] = serde_json::json!(sprints);
        output["last_observed_at"] = serde_json::json!(last.map(|t| t.to_rfc3339()));
    } else {
        output["snapshots"] = serde_json::json!(0);
    }

    println!("{output}");
    Ok(())
}
