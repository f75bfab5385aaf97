//! Per-entity first-event scanning with clipping at the observation boundary
//!
//! Given three parallel columns (entity ids, periods and event flags), this
//! crate computes for each distinct entity the first period at which a
//! qualifying event is observed. Periods at or beyond the largest observed
//! period are always recorded; earlier periods are recorded only when the
//! event flag is set.
//!
//! # Modules
//!
//! - [`observation`]: Input table and validation
//! - [`entity_index`]: Dense renumbering of entity ids into result slots
//! - [`slot_policy`]: Choice of the active slot on period-1 rows
//! - [`scan`]: The clip scan itself
//! - [`time_to_event`]: Durations until the first event, for survival analysis
//! - [`multinom`]: Single-trial multinomial draws over probability rows
//!
//! # Examples
//!
//! ```
//! let recorded = clipscan::scan(&[1, 1, 1], &[1, 2, 3], &[0, 0, 0]).unwrap();
//! assert_eq!(recorded, vec![3]);
//! ```
//!
//! Exposing the id to slot mapping:
//!
//! ```
//! use clipscan::{ObservationTable, scan::ClipScanner, slot_policy::SlotPolicy};
//!
//! let table = ObservationTable::new(vec![7, 7, 9, 9], vec![1, 2, 1, 2], vec![1, 0, 0, 0]);
//! let outcome = ClipScanner::default()
//!     .with_policy(SlotPolicy::OwnSlot)
//!     .scan(&table)
//!     .unwrap();
//! assert_eq!(outcome.entries().collect::<Vec<_>>(), vec![(7, 1), (9, 2)]);
//! ```

pub use self::{
    error::{Column, ScanError},
    observation::{Observation, ObservationTable},
    scan::scan,
};

pub mod entity_index;
pub mod error;
pub mod multinom;
pub mod observation;
pub mod scan;
pub mod slot_policy;
pub mod time_to_event;
