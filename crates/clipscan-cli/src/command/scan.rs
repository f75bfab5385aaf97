use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use clipscan::{
    entity_index::IndexOrder,
    scan::{ClipScanner, ScanOutcome},
    slot_policy::SlotPolicy,
};
use clipscan_stats::descriptive::RecordedSummary;
use serde::Serialize;
use tracing::info;

use crate::{command::Format, util};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Record into the slot before the entity's own (established behaviour)
    #[default]
    Preceding,
    /// Record into the entity's own slot
    Own,
}

impl From<PolicyArg> for SlotPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Preceding => SlotPolicy::PrecedingSlot,
            PolicyArg::Own => SlotPolicy::OwnSlot,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    /// Slots in order of first appearance
    #[default]
    FirstSeen,
    /// Slots in ascending entity id order
    Ascending,
}

impl From<OrderArg> for IndexOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::FirstSeen => IndexOrder::FirstSeen,
            OrderArg::Ascending => IndexOrder::Ascending,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ScanArg {
    /// Path to the observations JSON file
    observations: PathBuf,

    /// How period-1 rows select the active result slot
    #[arg(long, value_enum, default_value_t)]
    policy: PolicyArg,

    /// Order in which entity ids are assigned result slots
    #[arg(long, value_enum, default_value_t)]
    order: OrderArg,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SlotReport {
    slot: usize,
    entity_id: i64,
    recorded_period: i64,
}

#[derive(Debug, Serialize)]
struct ScanReport {
    max_period: i64,
    slots: Vec<SlotReport>,
}

impl From<&ScanOutcome> for ScanReport {
    fn from(outcome: &ScanOutcome) -> Self {
        Self {
            max_period: outcome.max_period,
            slots: outcome
                .entries()
                .enumerate()
                .map(|(slot, (entity_id, recorded_period))| SlotReport {
                    slot,
                    entity_id,
                    recorded_period,
                })
                .collect(),
        }
    }
}

pub(crate) fn run(arg: &ScanArg) -> anyhow::Result<()> {
    let table = util::read_observations_file(&arg.observations)?;
    let scanner = ClipScanner::default()
        .with_policy(arg.policy.into())
        .with_order(arg.order.into());

    let outcome = scanner
        .scan(&table)
        .with_context(|| format!("Failed to scan {}", arg.observations.display()))?;

    let summary = RecordedSummary::from_recorded(&outcome.recorded);
    info!(
        entities = summary.entities,
        recorded = summary.recorded,
        unrecorded = summary.unrecorded,
        max_period = outcome.max_period,
        "scan complete"
    );

    let report = ScanReport::from(&outcome);
    let mut output = util::Output::from_output_path(arg.output.clone())?;
    match arg.format {
        Format::Json => output.write_json(&report)?,
        Format::Table => {
            print_table(&mut output, &report, &summary)
                .with_context(|| format!("Failed to write table to {}", output.display_path()))?;
        }
    }
    Ok(())
}

fn print_table(
    output: &mut util::Output,
    report: &ScanReport,
    summary: &RecordedSummary,
) -> std::io::Result<()> {
    writeln!(output, "Clip Scan (max period = {})", report.max_period)?;
    writeln!(output, "  {:>6} {:>12} {:>10}", "Slot", "Entity", "Recorded")?;
    writeln!(output, "  {}", "-".repeat(30))?;
    for row in &report.slots {
        let recorded = if row.recorded_period == 0 {
            "-".to_string()
        } else {
            row.recorded_period.to_string()
        };
        writeln!(
            output,
            "  {:>6} {:>12} {:>10}",
            row.slot, row.entity_id, recorded
        )?;
    }
    writeln!(
        output,
        "  ({} of {} entities recorded, {:.1}%)",
        summary.recorded,
        summary.entities,
        100.0 * summary.recorded_rate()
    )?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use clipscan::ObservationTable;

    use super::*;

    #[test]
    fn test_report_lists_slots_in_order() {
        let table = ObservationTable::new(vec![2, 2, 1, 1], vec![1, 5, 1, 5], vec![0, 1, 0, 0]);
        let outcome = ClipScanner::default().scan(&table).unwrap();
        let report = ScanReport::from(&outcome);
        assert_eq!(report.max_period, 5);
        let ids = report.slots.iter().map(|s| s.entity_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 1]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["slots"][0]["recorded_period"], 5);
    }

    #[test]
    fn test_policy_mapping() {
        assert_eq!(SlotPolicy::from(PolicyArg::default()), SlotPolicy::PrecedingSlot);
        assert_eq!(IndexOrder::from(OrderArg::Ascending), IndexOrder::Ascending);
    }
}
