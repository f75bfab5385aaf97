//! Statistics over clip scan results.
//!
//! - [`descriptive`]: Summary of recorded periods (counts, min, max, mean)
//! - [`survival`]: Kaplan-Meier curves for right-censored event durations
//!
//! # Examples
//!
//! ```
//! use clipscan_stats::{descriptive::RecordedSummary, survival::KaplanMeierCurve};
//!
//! let summary = RecordedSummary::from_recorded(&[3, 0, 5]);
//! assert_eq!(summary.unrecorded, 1);
//!
//! // Data: (duration, censored)
//! let curve = KaplanMeierCurve::from_durations(vec![(2, false), (4, true), (3, false)]);
//! assert_eq!(curve.events, vec![1, 1]);
//! ```

pub mod descriptive;
pub mod survival;
