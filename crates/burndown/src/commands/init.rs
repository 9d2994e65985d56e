use super::Context;
use burndown_core::Settings;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    std::fs::create_dir_all(&ctx.paths.data_dir)?;

    let created_settings = write_if_missing(&ctx.settings_path, || {
        serde_json::to_string_pretty(&Settings::default())
    })?;
    let created_sprints = write_if_missing(&ctx.paths.sprints_file(), || Ok("[]\n".to_string()))?;

    println!("✓ Data directory: {}", ctx.paths.data_dir.display());
    report_file("settings", &ctx.settings_path, created_settings);
    report_file("sprints", &ctx.paths.sprints_file(), created_sprints);
    println!("  - ledger: {}", ctx.paths.ledger_file().display());

    Ok(())
}

/// Write `content()` atomically unless the file already exists
fn write_if_missing<F>(path: &std::path::Path, content: F) -> anyhow::Result<bool>
where
    F: FnOnce() -> serde_json::Result<String>,
{
    if path.exists() {
        return Ok(false);
    }
    burndown_ledger::atomic_write(path, content()?.as_bytes())?;
    Ok(true)
}

fn report_file(label: &str, path: &std::path::Path, created: bool) {
    let state = if created { "created" } else { "kept existing" };
    println!("  - {label}: {} ({state})", path.display());
}
