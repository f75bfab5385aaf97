//! Single-trial multinomial draws
//!
//! A single multinomial trial over `k` categories selects exactly one
//! category. The draw is reported as the 1-based index of that category,
//! which is the dot product of the one-hot outcome with `1..=k`.

use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DrawError {
    #[display("no categories to draw from")]
    Empty,
    #[display("invalid probabilities in row {row}")]
    InvalidWeights { row: usize },
}

/// Draws one category from `probs` and returns its 1-based index.
///
/// Probabilities need not sum to one; they are used as relative weights.
///
/// # Examples
///
/// ```
/// use clipscan::multinom::draw_category;
///
/// let mut rng = rand::rng();
/// assert_eq!(draw_category(&[0.0, 1.0, 0.0], &mut rng), Ok(2));
/// ```
pub fn draw_category<R>(probs: &[f64], rng: &mut R) -> Result<usize, DrawError>
where
    R: Rng + ?Sized,
{
    draw_row(0, probs, rng)
}

/// Draws one category per row of a probability matrix.
pub fn draw_categories<R>(rows: &[Vec<f64>], rng: &mut R) -> Result<Vec<usize>, DrawError>
where
    R: Rng + ?Sized,
{
    if rows.is_empty() {
        return Err(DrawError::Empty);
    }
    rows.iter()
        .enumerate()
        .map(|(row, probs)| draw_row(row, probs, rng))
        .collect()
}

fn draw_row<R>(row: usize, probs: &[f64], rng: &mut R) -> Result<usize, DrawError>
where
    R: Rng + ?Sized,
{
    if probs.is_empty() {
        return Err(DrawError::Empty);
    }
    if probs.iter().any(|p| !p.is_finite()) {
        return Err(DrawError::InvalidWeights { row });
    }
    let dist = WeightedIndex::new(probs).map_err(|_| DrawError::InvalidWeights { row })?;
    Ok(dist.sample(rng) + 1)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_degenerate_rows() {
        let mut rng = Pcg32::seed_from_u64(1);
        let rows = vec![vec![1.0, 0.0], vec![0.0, 0.0, 5.0], vec![0.0, 2.0]];
        assert_eq!(draw_categories(&rows, &mut rng), Ok(vec![1, 3, 2]));
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let probs = [0.2, 0.3, 0.5];
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let k = draw_category(&probs, &mut rng).unwrap();
            assert!((1..=3).contains(&k));
            counts[k - 1] += 1;
        }
        // Loose ordering check on a large sample.
        assert!(counts[0] < counts[2]);
    }

    #[test]
    fn test_invalid_input() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(draw_category(&[], &mut rng), Err(DrawError::Empty));
        assert_eq!(draw_categories(&[], &mut rng), Err(DrawError::Empty));
        assert_eq!(
            draw_category(&[0.0, 0.0], &mut rng),
            Err(DrawError::InvalidWeights { row: 0 })
        );
        assert_eq!(
            draw_categories(&[vec![1.0], vec![-1.0, 2.0]], &mut rng),
            Err(DrawError::InvalidWeights { row: 1 })
        );
        assert_eq!(
            draw_category(&[f64::NAN, 1.0], &mut rng),
            Err(DrawError::InvalidWeights { row: 0 })
        );
    }
}
