//! Observation tables supplied by the caller
//!
//! An observation table holds three parallel columns. Row `i` of each column
//! describes one observation of one entity:
//!
//! ```text
//! entity_ids:  [2, 2, 1, 1]
//! periods:     [1, 5, 1, 5]
//! event_flags: [0, 1, 0, 0]
//! ```
//!
//! Columns are kept as raw integers so that malformed input (negative ids,
//! flags other than 0/1) can be reported with the offending row instead of
//! being rejected by the deserializer.
//!
//! # Serialization
//!
//! ```json
//! {
//!   "entity_ids": [2, 2, 1, 1],
//!   "periods": [1, 5, 1, 5],
//!   "event_flags": [0, 1, 0, 0]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Column, ScanError};

/// One validated input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub entity_id: i64,
    pub period: i64,
    pub event_flag: bool,
}

impl Observation {
    /// Whether this row resets the active slot.
    #[must_use]
    pub fn is_first_period(&self) -> bool {
        self.period == 1
    }
}

/// Three parallel input columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObservationTable {
    pub entity_ids: Vec<i64>,
    pub periods: Vec<i64>,
    pub event_flags: Vec<i64>,
}

impl FromIterator<Observation> for ObservationTable {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        let mut table = Self::default();
        for row in iter {
            table.entity_ids.push(row.entity_id);
            table.periods.push(row.period);
            table.event_flags.push(i64::from(row.event_flag));
        }
        table
    }
}

impl ObservationTable {
    #[must_use]
    pub fn new(entity_ids: Vec<i64>, periods: Vec<i64>, event_flags: Vec<i64>) -> Self {
        Self {
            entity_ids,
            periods,
            event_flags,
        }
    }

    /// Number of rows, or `None` when the columns disagree in length.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        let n = self.entity_ids.len();
        (self.periods.len() == n && self.event_flags.len() == n).then_some(n)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Largest period in the table; the clipping boundary for a scan.
    #[must_use]
    pub fn max_period(&self) -> Option<i64> {
        self.periods.iter().copied().max()
    }

    /// Checks column lengths and value domains.
    ///
    /// Checks run in this order and stop at the first failure:
    /// column lengths, emptiness, then values row by row
    /// (`entity_id`, `period`, `event_flag` within a row).
    pub fn validate_values(&self) -> Result<(), ScanError> {
        let n = self.len().ok_or(ScanError::LengthMismatch {
            entity_ids: self.entity_ids.len(),
            periods: self.periods.len(),
            event_flags: self.event_flags.len(),
        })?;
        if n == 0 {
            return Err(ScanError::EmptyInput);
        }

        for row in 0..n {
            let checks = [
                (Column::EntityId, self.entity_ids[row], self.entity_ids[row] > 0),
                (Column::Period, self.periods[row], self.periods[row] > 0),
                (
                    Column::EventFlag,
                    self.event_flags[row],
                    matches!(self.event_flags[row], 0 | 1),
                ),
            ];
            if let Some(&(column, value, _)) = checks.iter().find(|(_, _, ok)| !ok) {
                return Err(ScanError::InvalidValue { column, row, value });
            }
        }
        Ok(())
    }

    /// Full validation required by the clip scan.
    ///
    /// On top of [`validate_values`](Self::validate_values), the first row
    /// must be a period-1 row: rows before the first period-1 row have no
    /// active slot to record into.
    pub fn validate(&self) -> Result<(), ScanError> {
        self.validate_values()?;
        if self.periods[0] != 1 {
            return Err(ScanError::InvalidSequence { row: 0 });
        }
        Ok(())
    }

    /// Iterates rows as [`Observation`]s.
    ///
    /// Values are not checked here; call [`validate`](Self::validate) first.
    pub fn rows(&self) -> impl Iterator<Item = Observation> + '_ {
        self.entity_ids
            .iter()
            .zip(&self.periods)
            .zip(&self.event_flags)
            .map(|((&entity_id, &period), &flag)| Observation {
                entity_id,
                period,
                event_flag: flag == 1,
            })
    }
}
