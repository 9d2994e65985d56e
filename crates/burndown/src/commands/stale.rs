use super::Context;
use burndown_flow::{find_stale_items, StaleItem};
use burndown_ledger::read_snapshot_log;
use chrono::Utc;

pub fn run(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let settings = ctx.load_settings()?;
    let log = read_snapshot_log(&ctx.paths.ledger_file())?;
    let stale = find_stale_items(&log.snapshots, &settings.stale, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&stale)?);
    } else {
        println!("{}", format_stale(&stale, settings.stale.max_wip_days));
    }
    Ok(())
}

fn format_stale(items: &[StaleItem], max_wip_days: i64) -> String {
    if items.is_empty() {
        return format!("No items in WIP longer than {max_wip_days} days.");
    }

    let mut lines = vec![format!(
        "{} items in WIP longer than {max_wip_days} days\n",
        items.len()
    )];
    for item in items {
        lines.push(format!(
            "  {:>4}d  #{} {} [{}] since {}",
            item.wip_days,
            item.item_id,
            item.title,
            item.status,
            item.since.date_naive()
        ));
    }
    lines.join("\n")
}
