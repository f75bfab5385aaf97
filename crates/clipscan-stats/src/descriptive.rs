/// Summary of the periods recorded by a clip scan.
///
/// A recorded value of `0` means no period was recorded for that entity;
/// such slots are counted separately and excluded from the period
/// statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSummary {
    /// Number of result slots.
    pub entities: usize,
    /// Slots holding a recorded period.
    pub recorded: usize,
    /// Slots left at `0`.
    pub unrecorded: usize,
    /// Smallest recorded period, if any slot was recorded.
    pub min: Option<i64>,
    /// Largest recorded period, if any slot was recorded.
    pub max: Option<i64>,
    /// Mean recorded period, if any slot was recorded.
    pub mean: Option<f64>,
}

impl RecordedSummary {
    /// Summarizes one scan result.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipscan_stats::descriptive::RecordedSummary;
    ///
    /// let summary = RecordedSummary::from_recorded(&[3, 0, 5]);
    /// assert_eq!(summary.recorded, 2);
    /// assert_eq!(summary.unrecorded, 1);
    /// assert_eq!(summary.min, Some(3));
    /// assert_eq!(summary.mean, Some(4.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_recorded(recorded: &[i64]) -> Self {
        let periods = recorded.iter().copied().filter(|p| *p != 0);
        let count = periods.clone().count();
        let mean = (count > 0)
            .then(|| periods.clone().map(i128::from).sum::<i128>() as f64 / count as f64);

        Self {
            entities: recorded.len(),
            recorded: count,
            unrecorded: recorded.len() - count,
            min: periods.clone().min(),
            max: periods.max(),
            mean,
        }
    }

    /// Fraction of slots with a recorded period.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn recorded_rate(&self) -> f64 {
        if self.entities == 0 {
            0.0
        } else {
            self.recorded as f64 / self.entities as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let summary = RecordedSummary::from_recorded(&[]);
        assert_eq!(summary.entities, 0);
        assert_eq!(summary.min, None);
        assert_eq!(summary.mean, None);
        assert!(summary.recorded_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_nothing_recorded() {
        let summary = RecordedSummary::from_recorded(&[0, 0]);
        assert_eq!(summary.unrecorded, 2);
        assert_eq!(summary.max, None);
    }

    #[test]
    fn test_mixed() {
        let summary = RecordedSummary::from_recorded(&[2, 0, 6, 4]);
        assert_eq!(summary.recorded, 3);
        assert_eq!(summary.min, Some(2));
        assert_eq!(summary.max, Some(6));
        assert_eq!(summary.mean, Some(4.0));
        assert!((summary.recorded_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_large_periods() {
        let period = i64::MAX / 2 + 1;
        let summary = RecordedSummary::from_recorded(&[period, period, 0]);
        assert_eq!(summary.recorded, 2);
        assert_eq!(summary.max, Some(period));
        assert_eq!(summary.mean, Some(4_611_686_018_427_387_904.0));
    }
}
