/// Kaplan-Meier estimate of the event-free curve.
///
/// Observations are `(duration, censored)` pairs. A censored observation
/// leaves the risk set without an event; only uncensored observations lower
/// the curve.
///
/// The curve is stored as parallel vectors, one entry per distinct duration
/// at which at least one event occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KaplanMeierCurve {
    /// Durations at which events occurred, ascending.
    pub times: Vec<usize>,
    /// Event-free probability just after each time point.
    pub survival_prob: Vec<f64>,
    /// Observations still at risk at each time point.
    pub at_risk: Vec<usize>,
    /// Events observed at each time point.
    pub events: Vec<usize>,
}

impl KaplanMeierCurve {
    /// Estimates the curve from `(duration, censored)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipscan_stats::survival::KaplanMeierCurve;
    ///
    /// let curve = KaplanMeierCurve::from_durations(vec![(2, false), (4, true), (3, false)]);
    /// assert_eq!(curve.times, vec![2, 3]);
    /// assert_eq!(curve.at_risk, vec![3, 2]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_durations(mut data: Vec<(usize, bool)>) -> Self {
        data.sort_unstable_by_key(|(duration, _)| *duration);

        let mut curve = Self::default();
        let mut survival = 1.0;
        let mut at_risk = data.len();

        for group in data.chunk_by(|a, b| a.0 == b.0) {
            let time = group[0].0;
            let events = group.iter().filter(|(_, censored)| !censored).count();
            if events > 0 {
                survival *= 1.0 - events as f64 / at_risk as f64;
                curve.times.push(time);
                curve.survival_prob.push(survival);
                curve.at_risk.push(at_risk);
                curve.events.push(events);
            }
            at_risk -= group.len();
        }

        curve
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Median event-free duration.
    ///
    /// Linearly interpolated between the two time points around the 50%
    /// crossing. `None` if the curve never drops to 50%.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipscan_stats::survival::KaplanMeierCurve;
    ///
    /// let curve = KaplanMeierCurve::from_durations(vec![(1, false), (2, false)]);
    /// assert_eq!(curve.median(), Some(1.0));
    ///
    /// let censored = KaplanMeierCurve::from_durations(vec![(1, false), (5, true), (5, true)]);
    /// assert_eq!(censored.median(), None);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        let i = self.survival_prob.iter().position(|s| *s <= 0.5)?;
        if i == 0 {
            return Some(self.times[0] as f64);
        }
        let (t0, t1) = (self.times[i - 1] as f64, self.times[i] as f64);
        let (s0, s1) = (self.survival_prob[i - 1], self.survival_prob[i]);
        Some(t0 + (0.5 - s0) / (s1 - s0) * (t1 - t0))
    }

    /// Event-free probability at `time` (step function, right-continuous).
    #[must_use]
    pub fn survival_at(&self, time: usize) -> f64 {
        let passed = self.times.partition_point(|t| *t <= time);
        passed
            .checked_sub(1)
            .map_or(1.0, |i| self.survival_prob[i])
    }

    /// Iterates `(time, survival_prob, at_risk, events)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (usize, f64, usize, usize)> + '_ {
        (0..self.times.len()).map(|i| {
            (
                self.times[i],
                self.survival_prob[i],
                self.at_risk[i],
                self.events[i],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty() {
        let curve = KaplanMeierCurve::from_durations(vec![]);
        assert!(curve.is_empty());
        assert_eq!(curve.median(), None);
        assert!(approx(curve.survival_at(10), 1.0));
    }

    #[test]
    fn test_all_censored() {
        let curve = KaplanMeierCurve::from_durations(vec![(3, true), (4, true)]);
        assert!(curve.is_empty());
        assert!(approx(curve.survival_at(4), 1.0));
    }

    #[test]
    fn test_censoring_shrinks_risk_set() {
        // 4 at risk at t=1 (1 event) -> 0.75
        // censored at 2 leaves 2 at risk at t=3 (1 event) -> 0.375
        let curve =
            KaplanMeierCurve::from_durations(vec![(3, false), (1, false), (2, true), (5, true)]);
        assert_eq!(curve.times, vec![1, 3]);
        assert_eq!(curve.at_risk, vec![4, 2]);
        assert_eq!(curve.events, vec![1, 1]);
        assert!(approx(curve.survival_prob[0], 0.75));
        assert!(approx(curve.survival_prob[1], 0.375));

        assert!(approx(curve.survival_at(0), 1.0));
        assert!(approx(curve.survival_at(2), 0.75));
        assert!(approx(curve.survival_at(3), 0.375));
        assert!(approx(curve.survival_at(100), 0.375));

        // Crossing between t=1 (0.75) and t=3 (0.375).
        let median = curve.median().unwrap();
        assert!(approx(median, 1.0 + (0.5 - 0.75) / (0.375 - 0.75) * 2.0));
    }

    #[test]
    fn test_ties() {
        let curve = KaplanMeierCurve::from_durations(vec![(2, false), (2, false), (2, true)]);
        assert_eq!(curve.events, vec![2]);
        assert!(approx(curve.survival_prob[0], 1.0 / 3.0));
        assert_eq!(curve.rows().count(), 1);
    }
}
