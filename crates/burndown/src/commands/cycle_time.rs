use super::Context;
use burndown_flow::{build_control_chart, compute_cycle_times, ControlChart, CycleTime};
use burndown_ledger::read_snapshot_log;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct CycleTimeOutput<'a> {
    cycle_times: &'a [CycleTime],
    chart: &'a ControlChart,
}

pub fn run(
    ctx: &Context,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = ctx.load_settings()?.cycle_time;
    if start.is_some() {
        config.start_date = start;
    }
    if end.is_some() {
        config.end_date = end;
    }

    let log = read_snapshot_log(&ctx.paths.ledger_file())?;
    let cycle_times = compute_cycle_times(&log.snapshots, &config)?;
    let chart = build_control_chart(&cycle_times, &config)?;

    if json {
        let output = CycleTimeOutput {
            cycle_times: &cycle_times,
            chart: &chart,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", format_cycle_times(&cycle_times, &chart));
    }
    Ok(())
}

fn format_cycle_times(cycle_times: &[CycleTime], chart: &ControlChart) -> String {
    if cycle_times.is_empty() {
        return "No completed items in range.".to_string();
    }

    let mut sections = Vec::new();
    sections.push(format!(
        "Cycle Time\n==========\nItems: {} | Average: {:.1} days",
        cycle_times.len(),
        chart.overall_average
    ));

    let rows: Vec<String> = cycle_times
        .iter()
        .map(|ct| {
            format!(
                "  #{} {}: {:.1} days ({} -> {})",
                ct.item_id,
                ct.title,
                ct.days(),
                ct.started_at.date_naive(),
                ct.finished_at.date_naive()
            )
        })
        .collect();
    sections.push(format!("\nItems\n-----\n{}", rows.join("\n")));

    let mut table = vec![format!(
        "{:<12} {:>8} {:>8} {:>8} {:>8}",
        "date", "ema", "avg", "upper", "lower"
    )];
    let mut last_date = None;
    for row in &chart.rows {
        // One line per day; items sharing a start day share smoothing values
        if last_date == Some(row.date) {
            continue;
        }
        last_date = Some(row.date);
        table.push(format!(
            "{:<12} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            row.date.to_string(),
            row.ema,
            row.average,
            row.upper_band,
            row.lower_band
        ));
    }
    sections.push(format!("\nControl Chart\n-------------\n{}", table.join("\n")));

    sections.join("\n")
}
