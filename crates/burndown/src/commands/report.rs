use super::Context;
use burndown_core::{run_pipeline, BurndownError, BurndownReport, Iteration, SprintWindow};
use burndown_ledger::{atomic_write, read_snapshot_log, Paths};
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct ReportArgs {
    pub sprint: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub fn run(ctx: &Context, args: ReportArgs) -> anyhow::Result<()> {
    let settings = ctx.load_settings()?;
    let config = &settings.burndown;

    let sprint = match args.sprint.or_else(|| config.sprint_name.clone()) {
        Some(name) if !name.trim().is_empty() => name,
        _ => anyhow::bail!(BurndownError::missing(
            "sprint name (pass --sprint or set burndown.sprint_name)"
        )),
    };

    // Window and statuses are checked before touching the ledger
    config.validate()?;
    let window = resolve_window(&ctx.paths, &sprint, args.start, args.end)?;

    let log = read_snapshot_log(&ctx.paths.ledger_file())?;
    let report = run_pipeline(config, Some(&window), &log)?;

    let json = serde_json::to_string_pretty(&report)?;
    let output = args
        .output
        .unwrap_or_else(|| ctx.paths.report_path(&window.name));
    atomic_write(&output, json.as_bytes())?;
    tracing::info!(path = %output.display(), "report saved");

    if args.json {
        println!("{json}");
    } else {
        println!("{}", format_report(&report));
    }
    Ok(())
}

/// Sprint window from explicit dates, or from the iteration of that name in sprints.json
pub fn resolve_window(
    paths: &Paths,
    sprint: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> burndown_core::Result<SprintWindow> {
    if let (Some(start), Some(end)) = (start, end) {
        return SprintWindow::new(sprint.trim(), start, end);
    }

    let sprints_file = paths.sprints_file();
    if !sprints_file.exists() {
        return Err(BurndownError::missing(format!(
            "sprint dates for '{sprint}' ({} not found; pass --start and --end)",
            sprints_file.display()
        )));
    }

    let iterations = Iteration::load_all(&sprints_file)?;
    let iteration = Iteration::find(&iterations, sprint).ok_or_else(|| {
        BurndownError::missing(format!(
            "sprint '{sprint}' is not defined in {}",
            sprints_file.display()
        ))
    })?;
    SprintWindow::from_iteration(iteration)
}

fn format_report(report: &BurndownReport) -> String {
    let mut sections = Vec::new();

    let sprint = &report.sprint;
    sections.push(format!(
        "Burndown: {}\n{}\n\
         Window: {} .. {} ({} days)\n\
         Scope: {} items, {} points",
        sprint.name,
        "=".repeat(sprint.name.len() + 10),
        sprint.start_date,
        sprint.end_date,
        sprint.total_days(),
        report.summary.total_item_count,
        format_points(report.summary.total_story_points),
    ));

    let mut table = vec![format!(
        "{:<12} {:>8} {:>10} {:>10} {:>7} {:>6}",
        "date", "ideal", "remaining", "completed", "items", "work"
    )];
    for (day, ideal) in report.daily.iter().zip(&report.ideal) {
        table.push(format!(
            "{:<12} {:>8} {:>10} {:>10} {:>7} {:>6}",
            day.date.to_string(),
            format_points(ideal.ideal_remaining_points),
            format_points(day.remaining_points),
            format_points(day.completed_points),
            day.remaining_count,
            if day.is_working_day { "yes" } else { "-" },
        ));
    }
    sections.push(format!("\nDaily\n-----\n{}", table.join("\n")));

    if !report.completion_log.is_empty() {
        let lines: Vec<String> = report
            .completion_log
            .iter()
            .map(|entry| {
                let mut line = format!(
                    "  {}  #{} {} [{}] {} pts",
                    entry.date,
                    entry.item_id,
                    entry.title,
                    entry.status,
                    format_points(entry.points)
                );
                if let Some(url) = &entry.url {
                    line.push_str(&format!("  {url}"));
                }
                line
            })
            .collect();
        sections.push(format!("\nCompleted\n---------\n{}", lines.join("\n")));
    }

    if !report.warnings.is_empty() {
        let lines: Vec<String> = report.warnings.iter().map(|w| format!("  ! {w}")).collect();
        sections.push(format!("\nWarnings\n--------\n{}", lines.join("\n")));
    }

    sections.join("\n")
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.1}")
    }
}
