//! Weighted-sum aggregation of normalized directions.

use serde::{Deserialize, Serialize};

/// One source's input to the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Fixed weight of the source.
    pub weight: f64,
    /// Normalized direction in `[-1, 1]`.
    pub direction: f64,
    /// Whether the source counts at all.
    pub present: bool,
}

impl Term {
    /// Creates a term for a present source.
    pub const fn present(weight: f64, direction: f64) -> Self {
        Self {
            weight,
            direction,
            present: true,
        }
    }

    /// Creates a term for an absent source.
    pub const fn absent(weight: f64) -> Self {
        Self {
            weight,
            direction: 0.0,
            present: false,
        }
    }

    /// Weighted contribution, bounded by `±weight`; zero when absent.
    pub fn contribution(&self) -> f64 {
        if self.present {
            self.weight * self.direction.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Result of aggregating all terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Signed weighted sum of present contributions.
    pub value: f64,
    /// Sum of all weights; `value` always lies in `[-max, max]`.
    pub max: f64,
    /// Number of present sources.
    pub sources_present: usize,
    /// Number of configured sources.
    pub sources_total: usize,
}

impl CompositeScore {
    /// Returns whether no source contributed, so `value` carries no
    /// information about the market.
    pub const fn is_empty(&self) -> bool {
        self.sources_present == 0
    }
}

/// Sums `weight * direction` over present terms.
///
/// Terms are accumulated strictly in slice order, so the floating-point result
/// is reproducible for a given source table. The denominator is fixed: absent
/// sources add nothing and do not rescale the others.
///
/// # Example
///
/// ```
/// use warroom_combine::{Term, aggregate};
///
/// let score = aggregate(&[
///     Term::present(4.0, -1.0),
///     Term::present(3.0, 1.0),
///     Term::absent(3.0),
/// ]);
///
/// assert_eq!(score.value, -1.0);
/// assert_eq!(score.max, 10.0);
/// assert_eq!(score.sources_present, 2);
/// ```
pub fn aggregate(terms: &[Term]) -> CompositeScore {
    let mut value = 0.0;
    let mut max = 0.0;
    let mut sources_present = 0;

    for term in terms {
        max += term.weight;
        if term.present {
            value += term.contribution();
            sources_present += 1;
        }
    }

    CompositeScore {
        value,
        max,
        sources_present,
        sources_total: terms.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WEIGHTS: [f64; 3] = [4.0, 3.0, 3.0];

    fn terms(directions: [Option<f64>; 3]) -> Vec<Term> {
        WEIGHTS
            .iter()
            .zip(directions)
            .map(|(&w, d)| d.map_or(Term::absent(w), |d| Term::present(w, d)))
            .collect()
    }

    #[test]
    fn test_all_bullish_reaches_max() {
        let score = aggregate(&terms([Some(1.0), Some(1.0), Some(1.0)]));
        assert_relative_eq!(score.value, 10.0);
        assert_relative_eq!(score.max, 10.0);
        assert_eq!(score.sources_present, 3);
    }

    #[test]
    fn test_all_absent_differs_from_all_neutral() {
        let absent = aggregate(&terms([None, None, None]));
        let neutral = aggregate(&terms([Some(0.0), Some(0.0), Some(0.0)]));

        assert_relative_eq!(absent.value, 0.0);
        assert_relative_eq!(neutral.value, 0.0);
        assert!(absent.is_empty());
        assert!(!neutral.is_empty());
        assert_eq!(neutral.sources_present, 3);
    }

    #[test]
    fn test_empty_input() {
        let score = aggregate(&[]);
        assert_relative_eq!(score.value, 0.0);
        assert_eq!(score.sources_total, 0);
    }

    #[test]
    fn test_contribution_is_bounded_by_weight() {
        assert_relative_eq!(Term::present(4.0, 3.0).contribution(), 4.0);
        assert_relative_eq!(Term::present(4.0, -3.0).contribution(), -4.0);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        let steps = [-1.0, -1.0 / 3.0, 0.0, 1.0 / 3.0, 1.0];
        for &a in &steps {
            for &b in &steps {
                for c in [None, Some(-1.0), Some(1.0)] {
                    let score = aggregate(&terms([Some(a), Some(b), c]));
                    assert!(score.value.abs() <= score.max + 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_monotonic_in_each_direction() {
        for slot in 0..3 {
            let mut previous = f64::NEG_INFINITY;
            for d in [-1.0, 0.0, 1.0] {
                let mut directions = [Some(0.0); 3];
                directions[slot] = Some(d);
                let value = aggregate(&terms(directions)).value;
                assert!(value >= previous);
                previous = value;
            }
        }
    }
}
