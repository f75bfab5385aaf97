//! First-event scan with clipping at the maximum observed period
//!
//! For every entity the scan records the first period at which a qualifying
//! event is observed. Let `maxperiod` be the largest period in the table:
//!
//! - a row with `period < maxperiod` is recorded only if its event flag is set
//! - a row with `period >= maxperiod` is always recorded
//!
//! Rows are not grouped by entity. Instead, a cursor selects the active
//! result slot; the cursor moves only on period-1 rows (see
//! [`SlotPolicy`]) and every other row is attributed to whatever slot the
//! cursor last pointed at. A slot keeps the first value recorded into it.
//!
//! ```text
//! row  id  period  flag   cursor  recorded
//!  0    2     1      0    slot 1  -
//!  1    2     5      1    slot 1  slot 1 = 5   (boundary)
//!  2    1     1      0    slot 0  -
//!  3    1     5      0    slot 0  slot 0 = 5   (boundary)
//! ```
//!
//! # Examples
//!
//! ```
//! use clipscan::{ObservationTable, scan::ClipScanner};
//!
//! let table = ObservationTable::new(vec![1, 1, 1], vec![1, 2, 3], vec![0, 0, 0]);
//! let outcome = ClipScanner::default().scan(&table).unwrap();
//! assert_eq!(outcome.recorded, vec![3]);
//! ```

use tracing::{debug, trace};

use crate::{
    entity_index::{EntityIndex, IndexOrder},
    error::ScanError,
    observation::{Observation, ObservationTable},
    slot_policy::SlotPolicy,
};

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipScanner {
    pub policy: SlotPolicy,
    pub order: IndexOrder,
}

/// Result of a scan together with the mapping needed to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Recorded period per slot; `0` means nothing was recorded.
    pub recorded: Vec<i64>,
    /// Mapping from entity id to slot.
    pub index: EntityIndex,
    /// Clipping boundary used by this scan.
    pub max_period: i64,
}

impl ScanOutcome {
    /// Iterates `(entity_id, recorded_period)` pairs in slot order.
    ///
    /// Stops at the shorter of the index and `recorded`.
    pub fn entries(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.index
            .iter()
            .zip(&self.recorded)
            .map(|((_, entity_id), recorded)| (entity_id, *recorded))
    }
}

/// State carried from row to row.
#[derive(Debug, Clone, Copy, Default)]
struct ScanCursor {
    active: Option<usize>,
}

impl ScanCursor {
    fn advance(
        self,
        row: usize,
        obs: Observation,
        index: &EntityIndex,
        policy: SlotPolicy,
    ) -> Result<Self, ScanError> {
        if !obs.is_first_period() {
            return Ok(self);
        }
        let slot = index
            .slot_of(obs.entity_id)
            .ok_or(ScanError::InvalidSequence { row })?;
        Ok(Self {
            active: Some(policy.target(slot, index.len())),
        })
    }
}

fn qualifies(obs: Observation, max_period: i64) -> bool {
    obs.period >= max_period || obs.event_flag
}

impl ClipScanner {
    #[must_use]
    pub fn with_policy(self, policy: SlotPolicy) -> Self {
        Self { policy, ..self }
    }

    #[must_use]
    pub fn with_order(self, order: IndexOrder) -> Self {
        Self { order, ..self }
    }

    /// Scans a table.
    ///
    /// The table is fully validated first (see [`ObservationTable::validate`]),
    /// so either every slot is computed or an error is returned.
    pub fn scan(&self, table: &ObservationTable) -> Result<ScanOutcome, ScanError> {
        table.validate()?;
        let max_period = table.max_period().ok_or(ScanError::EmptyInput)?;
        let index = EntityIndex::build(table.entity_ids.iter().copied(), self.order);
        let mut recorded = vec![0; index.len()];

        table
            .rows()
            .enumerate()
            .try_fold(ScanCursor::default(), |cursor, (row, obs)| {
                let cursor = cursor.advance(row, obs, &index, self.policy)?;
                let slot = cursor.active.ok_or(ScanError::InvalidSequence { row })?;
                if recorded[slot] == 0 && qualifies(obs, max_period) {
                    trace!(row, slot, period = obs.period, "recorded");
                    recorded[slot] = obs.period;
                }
                Ok::<_, ScanError>(cursor)
            })?;

        debug!(
            rows = table.entity_ids.len(),
            entities = index.len(),
            max_period,
            unrecorded = recorded.iter().filter(|p| **p == 0).count(),
            "clip scan finished"
        );

        Ok(ScanOutcome {
            recorded,
            index,
            max_period,
        })
    }
}

/// Runs a scan over three parallel columns with default settings.
///
/// Returns one recorded period per distinct entity id, with slots assigned in
/// order of first appearance.
///
/// # Examples
///
/// ```
/// let recorded = clipscan::scan(&[2, 2, 1, 1], &[1, 5, 1, 5], &[0, 1, 0, 0]).unwrap();
/// assert_eq!(recorded, vec![5, 5]);
///
/// assert!(clipscan::scan(&[], &[], &[]).is_err());
/// ```
pub fn scan(
    entity_ids: &[i64],
    periods: &[i64],
    event_flags: &[i64],
) -> Result<Vec<i64>, ScanError> {
    let table = ObservationTable::new(
        entity_ids.to_vec(),
        periods.to_vec(),
        event_flags.to_vec(),
    );
    ClipScanner::default()
        .scan(&table)
        .map(|outcome| outcome.recorded)
}
