//! Time-to-event extraction with Kaplan-Meier summary
//!
//! Splits the observation table into runs ending at the maximum period,
//! measures each run until its first event, and estimates the event-free
//! curve while treating runs without an event as right-censored.

use std::{
    fmt::Write as _,
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Args;
use clipscan::time_to_event::{self, DurationSummary};
use clipscan_stats::survival::KaplanMeierCurve;
use serde::Serialize;
use tracing::info;

use crate::{command::Format, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct DurationsArg {
    /// Path to the observations JSON file
    observations: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save the Kaplan-Meier curve as CSV to this path
    #[arg(long)]
    km_output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct KmPoint {
    time: usize,
    survival_prob: f64,
    at_risk: usize,
    events: usize,
}

#[derive(Debug, Serialize)]
struct DurationsReport<'a> {
    #[serde(flatten)]
    summary: &'a DurationSummary,
    censored_count: usize,
    median_km: Option<f64>,
    km_curve: Vec<KmPoint>,
}

impl<'a> DurationsReport<'a> {
    fn new(summary: &'a DurationSummary, curve: &KaplanMeierCurve) -> Self {
        Self {
            summary,
            censored_count: summary.censored_count(),
            median_km: curve.median(),
            km_curve: curve
                .rows()
                .map(|(time, survival_prob, at_risk, events)| KmPoint {
                    time,
                    survival_prob,
                    at_risk,
                    events,
                })
                .collect(),
        }
    }
}

pub(crate) fn run(arg: &DurationsArg) -> anyhow::Result<()> {
    let table = util::read_observations_file(&arg.observations)?;
    let summary = time_to_event::extract_durations(&table).with_context(|| {
        format!(
            "Failed to extract durations from {}",
            arg.observations.display()
        )
    })?;
    let curve = KaplanMeierCurve::from_durations(summary.survival_data());
    let report = DurationsReport::new(&summary, &curve);

    info!(
        runs = summary.durations.len(),
        censored = report.censored_count,
        dropped_rows = summary.dropped_rows,
        "durations extracted"
    );

    if let Some(path) = &arg.km_output {
        save_km_curve(path, &curve)?;
    }

    let mut output = util::Output::from_output_path(arg.output.clone())?;
    match arg.format {
        Format::Json => output.write_json(&report)?,
        Format::Table => print_table(&mut output, &report)
            .with_context(|| format!("Failed to write table to {}", output.display_path()))?,
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn print_table(output: &mut util::Output, report: &DurationsReport<'_>) -> std::io::Result<()> {
    let total = report.summary.durations.len();
    let complete = total - report.censored_count;
    let mean_complete = if complete == 0 {
        0.0
    } else {
        report
            .summary
            .durations
            .iter()
            .filter(|d| !d.censored)
            .map(|d| d.duration)
            .sum::<usize>() as f64
            / complete as f64
    };
    let median = report
        .median_km
        .map_or("N/A".to_string(), |m| format!("{m:.1}"));

    writeln!(output, "Time to First Event")?;
    writeln!(
        output,
        "  {:>8} {:>10} {:>10} {:>12} {:>12}",
        "Runs", "Censored", "Dropped", "Mean(Comp)", "Median(KM)"
    )?;
    writeln!(output, "  {}", "-".repeat(56))?;
    writeln!(
        output,
        "  {:>8} {:>10} {:>10} {:>12.1} {:>12}",
        total, report.censored_count, report.summary.dropped_rows, mean_complete, median
    )?;

    if !report.km_curve.is_empty() {
        writeln!(output)?;
        writeln!(
            output,
            "  {:>6} {:>10} {:>8} {:>8}",
            "Time", "Survival", "AtRisk", "Events"
        )?;
        for p in &report.km_curve {
            writeln!(
                output,
                "  {:>6} {:>10.4} {:>8} {:>8}",
                p.time, p.survival_prob, p.at_risk, p.events
            )?;
        }
    }
    output.flush()
}

fn save_km_curve(path: &Path, curve: &KaplanMeierCurve) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let mut csv_content = String::from("time,survival_prob,at_risk,events\n");
    for (time, survival_prob, at_risk, events) in curve.rows() {
        writeln!(
            &mut csv_content,
            "{time},{survival_prob},{at_risk},{events}"
        )
        .with_context(|| format!("Failed to write CSV row for time {time}"))?;
    }

    fs::write(path, csv_content)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    info!(path = %path.display(), "KM curve saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clipscan::ObservationTable;

    use super::*;

    #[test]
    fn test_report_json() {
        let table = ObservationTable::new(
            vec![1, 1, 2, 2, 3, 3],
            vec![1, 2, 1, 2, 1, 2],
            vec![1, 0, 0, 0, 0, 1],
        );
        let summary = time_to_event::extract_durations(&table).unwrap();
        let curve = KaplanMeierCurve::from_durations(summary.survival_data());
        let report = DurationsReport::new(&summary, &curve);
        assert_eq!(report.censored_count, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dropped_rows"], 0);
        assert_eq!(json["durations"][1]["censored"], true);
        assert_eq!(json["km_curve"][0]["time"], 1);
        assert_eq!(json["km_curve"][0]["at_risk"], 3);
    }
}
