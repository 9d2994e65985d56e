mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so report output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::resolve(cli.data_dir, cli.settings)?;

    match cli.command {
        Commands::Init => commands::init::run(&ctx),
        Commands::Import { file } => commands::import::run(&ctx, &file),
        Commands::Report {
            sprint,
            start,
            end,
            output,
            json,
        } => commands::report::run(
            &ctx,
            commands::report::ReportArgs {
                sprint,
                start,
                end,
                output,
                json,
            },
        ),
        Commands::Stale { json } => commands::stale::run(&ctx, json),
        Commands::CycleTime { start, end, json } => commands::cycle_time::run(&ctx, start, end, json),
        Commands::Dedupe { dry_run, force } => commands::dedupe::run(&ctx, dry_run, force),
        Commands::Status => commands::status::run(&ctx),
        Commands::Version => commands::version::run(),
    }
}
