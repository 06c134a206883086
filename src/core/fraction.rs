use serde::{Deserialize, Serialize};

use crate::matching::engine::EngineError;

/// Safely convert usize to f64 for fraction arithmetic
///
/// Child counts stay far below the 2^53 limit of the f64 mantissa, so the
/// conversion is exact for every tree that passes validation.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// "How much matched out of how much was compared."
///
/// A fraction is never normalised to lowest terms: `(2, 4)` and `(1, 2)` are
/// the same percentage but carry different weight when merged, because
/// [`Fraction::merge`] adds numerators and denominators independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fraction {
    /// Matched units
    pub matches: f64,

    /// Compared units
    pub total: f64,
}

impl Fraction {
    /// Neutral element of [`Fraction::merge`]
    pub const ZERO: Self = Self {
        matches: 0.0,
        total: 0.0,
    };

    /// One unit compared, one unit matched
    pub const MATCH: Self = Self {
        matches: 1.0,
        total: 1.0,
    };

    /// One unit compared, nothing matched
    pub const MISMATCH: Self = Self {
        matches: 0.0,
        total: 1.0,
    };

    #[must_use]
    pub fn new(matches: f64, total: f64) -> Self {
        Self { matches, total }
    }

    /// Weighted combination: `(m1 + m2, t1 + t2)`.
    ///
    /// A sub-comparison with a larger total pulls the aggregate proportionally
    /// harder than one with a small total.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            matches: self.matches + other.matches,
            total: self.total + other.total,
        }
    }

    /// Fold any number of fractions with [`Fraction::merge`], starting from [`Fraction::ZERO`]
    #[must_use]
    pub fn merge_all(fractions: impl IntoIterator<Item = Self>) -> Self {
        fractions.into_iter().fold(Self::ZERO, Self::merge)
    }

    /// `(m², t)`: emphasise strong matches before merging
    #[must_use]
    pub fn square_numerator(self) -> Self {
        Self {
            matches: self.matches * self.matches,
            total: self.total,
        }
    }

    /// `(√m, t)`: inverse of [`Fraction::square_numerator`]
    #[must_use]
    pub fn sqrt_numerator(self) -> Self {
        Self {
            matches: self.matches.sqrt(),
            total: self.total,
        }
    }

    /// `(m, t / k)`: rescale a total that grew with the number of pairwise comparisons.
    ///
    /// A non-positive `k` leaves the fraction unchanged.
    #[must_use]
    pub fn divide_denominator(self, k: f64) -> Self {
        if k <= 0.0 {
            return self;
        }
        Self {
            matches: self.matches,
            total: self.total / k,
        }
    }

    /// Clamp `matches` into `[0, total]`
    #[must_use]
    pub(crate) fn capped(self) -> Self {
        Self {
            matches: self.matches.clamp(0.0, self.total.max(0.0)),
            total: self.total,
        }
    }

    /// `matches / total`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ZeroDenominator` when nothing was compared.
    pub fn percent(&self) -> Result<f64, EngineError> {
        if self.total <= 0.0 {
            return Err(EngineError::ZeroDenominator);
        }
        Ok(self.matches / self.total)
    }

    /// True when at least one unit was compared
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.total > 0.0
    }

    /// True when every compared unit matched
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.is_measured() && self.matches >= self.total
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.matches, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_both_parts() {
        let merged = Fraction::new(1.0, 1.0).merge(Fraction::new(0.0, 1.0));
        assert_eq!(merged, Fraction::new(1.0, 2.0));

        // Weighted by totals, not a mean of ratios
        let merged = Fraction::new(9.0, 10.0).merge(Fraction::new(0.0, 1.0));
        assert!((merged.percent().unwrap() - 9.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_all_empty_is_zero() {
        assert_eq!(Fraction::merge_all(std::iter::empty()), Fraction::ZERO);
        assert_eq!(
            Fraction::merge_all([Fraction::MATCH, Fraction::MISMATCH, Fraction::MATCH]),
            Fraction::new(2.0, 3.0)
        );
    }

    #[test]
    fn test_square_then_sqrt_round_trips_perfect_squares() {
        let f = Fraction::new(3.0, 5.0);
        assert_eq!(f.square_numerator(), Fraction::new(9.0, 5.0));
        assert_eq!(
            f.square_numerator()
                .square_numerator()
                .sqrt_numerator()
                .sqrt_numerator(),
            f
        );
    }

    #[test]
    fn test_divide_denominator() {
        assert_eq!(
            Fraction::new(2.0, 4.0).divide_denominator(2.0),
            Fraction::new(2.0, 2.0)
        );
        assert_eq!(
            Fraction::new(1.0, 3.0).divide_denominator(0.0),
            Fraction::new(1.0, 3.0)
        );
    }

    #[test]
    fn test_percent() {
        assert!((Fraction::new(1.0, 2.0).percent().unwrap() - 0.5).abs() < 1e-12);
        assert!(matches!(
            Fraction::ZERO.percent(),
            Err(EngineError::ZeroDenominator)
        ));
    }

    #[test]
    fn test_capped() {
        assert_eq!(Fraction::new(3.0, 1.5).capped(), Fraction::new(1.5, 1.5));
        assert_eq!(Fraction::new(1.0, 2.0).capped(), Fraction::new(1.0, 2.0));
    }

    #[test]
    fn test_is_perfect() {
        assert!(Fraction::MATCH.is_perfect());
        assert!(!Fraction::MISMATCH.is_perfect());
        assert!(!Fraction::ZERO.is_perfect());
    }
}
