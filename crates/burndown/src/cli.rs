use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "burndown")]
#[command(version)]
#[command(about = "Sprint burndown and flow reports from daily status snapshots")]
pub struct Cli {
    /// Data directory (defaults to ~/.burndown)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Settings file (defaults to <data-dir>/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Append snapshots from a JSON array or JSONL file to the ledger
    Import {
        /// Path to the exported snapshots
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Compute the burndown for a sprint
    Report {
        /// Sprint name (defaults to burndown.sprint_name)
        #[arg(short, long)]
        sprint: Option<String>,

        /// First sprint day, overrides sprints.json
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// Last sprint day, overrides sprints.json
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,

        /// Where to save the JSON report (defaults to <data-dir>/reports/<sprint>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List items stuck in a WIP status
    Stale {
        #[arg(long)]
        json: bool,
    },

    /// Cycle times and control chart
    CycleTime {
        /// Range start, overrides cycle_time.start_date
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end, overrides cycle_time.end_date
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Remove repeated snapshots of an item, keeping the oldest of each run.
    /// A row is only a duplicate when it matches the item's previous
    /// observation, so reopened items keep their history.
    Dedupe {
        /// Report what would be removed without rewriting the ledger
        #[arg(long)]
        dry_run: bool,

        /// Rewrite even if unreadable records would be dropped
        #[arg(long)]
        force: bool,
    },

    /// Show data directory status
    Status,

    /// Print version information
    Version,
}
