use super::Context;
use burndown_ledger::{read_snapshot_log, remove_duplicates, write_jsonl};

pub fn run(ctx: &Context, dry_run: bool, force: bool) -> anyhow::Result<()> {
    let ledger = ctx.paths.ledger_file();
    if !ledger.exists() {
        println!("No ledger at {}", ledger.display());
        return Ok(());
    }

    let log = read_snapshot_log(&ledger)?;
    let unique = remove_duplicates(&log.snapshots);
    let removed = log.len() - unique.len();

    if dry_run {
        println!(
            "Would remove {removed} duplicate snapshots ({} kept)",
            unique.len()
        );
        if log.skipped > 0 {
            println!(
                "{} unreadable records block the rewrite (use --force to drop them)",
                log.skipped
            );
        }
        return Ok(());
    }

    if removed == 0 {
        println!("✓ No duplicates found");
        return Ok(());
    }

    // The rewrite only carries validated snapshots; unreadable lines would be lost
    if log.skipped > 0 {
        if !force {
            anyhow::bail!(
                "{} ledger records could not be read and would be deleted by the rewrite; \
                 fix {} or pass --force",
                log.skipped,
                ledger.display()
            );
        }
        tracing::warn!(
            skipped = log.skipped,
            "dropping unreadable records while rewriting the ledger"
        );
    }
    write_jsonl(&ledger, &unique)?;
    println!("✓ Removed {removed} duplicate snapshots ({} kept)", unique.len());
    Ok(())
}
