//! Time-to-event extraction from an observation table
//!
//! Rows are split into runs, each run ending at a row observed at the
//! maximum period. For each run, the duration is the number of rows up to and
//! including the first event-flagged row. Runs without any event are
//! right-censored at their full length.
//!
//! ```text
//! period:  1 2 3 4 | 1 2 3 4
//! flag:    0 1 0 1 | 0 0 0 0
//!          ---+---   -------+
//!          event at 2        censored at 4
//! ```
//!
//! The resulting `(duration, censored)` pairs are the input expected by a
//! Kaplan-Meier estimator.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{error::ScanError, observation::ObservationTable};

/// Duration of one run until its first event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventDuration {
    /// Entity id of the first row of the run.
    pub entity_id: i64,
    /// Rows observed until (and including) the first event, or the run
    /// length when no event occurred.
    pub duration: usize,
    /// `true` when the run ended without an event.
    pub censored: bool,
}

/// All runs extracted from a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DurationSummary {
    pub durations: Vec<EventDuration>,
    /// Trailing rows after the last boundary row; they form no complete run.
    pub dropped_rows: usize,
}

impl DurationSummary {
    /// `(duration, censored)` pairs for survival analysis.
    #[must_use]
    pub fn survival_data(&self) -> Vec<(usize, bool)> {
        self.durations
            .iter()
            .map(|d| (d.duration, d.censored))
            .collect()
    }

    #[must_use]
    pub fn censored_count(&self) -> usize {
        self.durations.iter().filter(|d| d.censored).count()
    }
}

#[derive(Debug, Default)]
struct Run {
    entity_id: Option<i64>,
    len: usize,
    first_event: Option<usize>,
}

/// Extracts event durations from a table.
///
/// Unlike the clip scan, the table does not have to start with a period-1
/// row.
///
/// # Examples
///
/// ```
/// use clipscan::{ObservationTable, time_to_event::extract_durations};
///
/// let table = ObservationTable::new(
///     vec![1, 1, 1, 2, 2, 2],
///     vec![1, 2, 3, 1, 2, 3],
///     vec![0, 1, 0, 0, 0, 0],
/// );
/// let summary = extract_durations(&table).unwrap();
/// assert_eq!(summary.survival_data(), vec![(2, false), (3, true)]);
/// ```
pub fn extract_durations(table: &ObservationTable) -> Result<DurationSummary, ScanError> {
    table.validate_values()?;
    let max_period = table.max_period().ok_or(ScanError::EmptyInput)?;

    let mut durations = vec![];
    let mut run = Run::default();
    for obs in table.rows() {
        let entity_id = *run.entity_id.get_or_insert(obs.entity_id);
        run.len += 1;
        if obs.event_flag && run.first_event.is_none() {
            run.first_event = Some(run.len);
        }
        if obs.period >= max_period {
            durations.push(EventDuration {
                entity_id,
                duration: run.first_event.unwrap_or(run.len),
                censored: run.first_event.is_none(),
            });
            run = Run::default();
        }
    }

    if run.len > 0 {
        warn!(
            rows = run.len,
            max_period, "trailing rows never reach the maximum period; dropped"
        );
    }
    debug!(runs = durations.len(), "extracted event durations");

    Ok(DurationSummary {
        durations,
        dropped_rows: run.len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ids: &[i64], periods: &[i64], flags: &[i64]) -> ObservationTable {
        ObservationTable::new(ids.to_vec(), periods.to_vec(), flags.to_vec())
    }

    #[test]
    fn test_event_and_censored_runs() {
        let t = table(
            &[1, 1, 1, 1, 2, 2, 2, 2],
            &[1, 2, 3, 4, 1, 2, 3, 4],
            &[0, 1, 0, 1, 0, 0, 0, 0],
        );
        let summary = extract_durations(&t).unwrap();
        assert_eq!(
            summary.durations,
            vec![
                EventDuration {
                    entity_id: 1,
                    duration: 2,
                    censored: false,
                },
                EventDuration {
                    entity_id: 2,
                    duration: 4,
                    censored: true,
                },
            ]
        );
        assert_eq!(summary.censored_count(), 1);
        assert_eq!(summary.dropped_rows, 0);
    }

    #[test]
    fn test_event_at_boundary_is_not_censored() {
        let t = table(&[3, 3, 3], &[1, 2, 3], &[0, 0, 1]);
        let summary = extract_durations(&t).unwrap();
        assert_eq!(summary.survival_data(), vec![(3, false)]);
    }

    #[test]
    fn test_rows_after_event_do_not_leak_into_next_run() {
        let t = table(&[1, 1, 1, 2, 2, 2], &[1, 2, 3, 1, 2, 3], &[1, 0, 0, 0, 1, 0]);
        let summary = extract_durations(&t).unwrap();
        assert_eq!(summary.survival_data(), vec![(1, false), (2, false)]);
    }

    #[test]
    fn test_trailing_rows_dropped() {
        let t = table(&[1, 1, 2, 2], &[1, 2, 1, 1], &[0, 0, 1, 0]);
        let summary = extract_durations(&t).unwrap();
        assert_eq!(summary.survival_data(), vec![(2, true)]);
        assert_eq!(summary.dropped_rows, 2);
    }

    #[test]
    fn test_does_not_require_period_one_start() {
        let t = table(&[1, 1], &[2, 3], &[0, 0]);
        assert_eq!(extract_durations(&t).unwrap().survival_data(), vec![(2, true)]);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            extract_durations(&ObservationTable::default()),
            Err(ScanError::EmptyInput)
        );
        assert!(extract_durations(&table(&[1], &[1, 2], &[0])).is_err());
    }
}
