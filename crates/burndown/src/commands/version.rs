pub fn run() -> anyhow::Result<()> {
    println!("burndown {}", env!("CARGO_PKG_VERSION"));
    println!("Sprint burndown reconstruction from daily status snapshots");
    Ok(())
}
