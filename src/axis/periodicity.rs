//! Periodicity descriptor for sampled axes.

use crate::util::{Error, Result};

/// Declared repetition of a sampled axis.
///
/// An axis of `N` samples with `period_count` periods repeats a block of
/// `N / period_count` samples. When anti-periodic, `period_count` counts
/// anti-periods: consecutive blocks of `N / period_count` samples alternate
/// sign, so one full period is two blocks and `period_count` must be even.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodicity {
    period_count: usize,
    is_antiperiod: bool,
    smallest_length: usize,
}

impl Periodicity {
    /// Validate the declaration against an axis of `length` samples.
    pub fn new(
        axis: &str,
        length: usize,
        period_count: usize,
        is_antiperiod: bool,
    ) -> Result<Self> {
        if period_count == 0
            || length == 0
            || length % period_count != 0
            || (is_antiperiod && period_count % 2 != 0)
        {
            return Err(Error::Periodicity {
                axis: axis.to_string(),
                length,
                period_count,
                is_antiperiod,
            });
        }
        Ok(Self {
            period_count,
            is_antiperiod,
            smallest_length: length / period_count,
        })
    }

    /// Declared count: periods, or anti-periods when anti-periodic.
    #[inline]
    pub fn period_count(&self) -> usize {
        self.period_count
    }

    /// Number of full periods over the axis.
    #[inline]
    pub fn full_periods(&self) -> usize {
        if self.is_antiperiod {
            self.period_count / 2
        } else {
            self.period_count
        }
    }

    /// Whether consecutive half-periods alternate sign.
    #[inline]
    pub fn is_antiperiod(&self) -> bool {
        self.is_antiperiod
    }

    /// Samples in the smallest unique block (the stored length).
    #[inline]
    pub fn smallest_length(&self) -> usize {
        self.smallest_length
    }

    /// Samples in one full period (twice the smallest block if anti-periodic).
    #[inline]
    pub fn one_period_length(&self) -> usize {
        if self.is_antiperiod {
            2 * self.smallest_length
        } else {
            self.smallest_length
        }
    }

    /// Total declared length, `full_periods * one_period_length`.
    #[inline]
    pub fn total_length(&self) -> usize {
        self.full_periods() * self.one_period_length()
    }

    /// Stored sample and sign feeding output position `i` of a tiled axis.
    #[inline]
    pub fn source(&self, i: usize) -> (usize, f64) {
        let block = i / self.smallest_length;
        let sign = if self.is_antiperiod && block % 2 == 1 { -1.0 } else { 1.0 };
        (i % self.smallest_length, sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_lengths() {
        let p = Periodicity::new("time", 10, 5, false).unwrap();
        assert_eq!(p.smallest_length(), 2);
        assert_eq!(p.one_period_length(), 2);
        assert_eq!(p.total_length(), 10);
    }

    #[test]
    fn test_antiperiodic_lengths() {
        let p = Periodicity::new("time", 16, 4, true).unwrap();
        assert_eq!(p.smallest_length(), 4);
        assert_eq!(p.one_period_length(), 8);
        assert_eq!(p.full_periods(), 2);
        assert_eq!(p.total_length(), 16);
    }

    #[test]
    fn test_not_divisible() {
        assert!(matches!(
            Periodicity::new("time", 10, 3, false),
            Err(Error::Periodicity { length: 10, period_count: 3, .. })
        ));
        // anti-periods come in pairs
        assert!(Periodicity::new("time", 10, 5, true).is_err());
        assert!(Periodicity::new("time", 10, 10, true).is_ok());
        assert!(Periodicity::new("time", 10, 0, false).is_err());
    }

    #[test]
    fn test_source_signs() {
        let p = Periodicity::new("angle", 8, 4, true).unwrap();
        let signs: Vec<f64> = (0..8).map(|i| p.source(i).1).collect();
        assert_eq!(signs, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0]);
        let idx: Vec<usize> = (0..8).map(|i| p.source(i).0).collect();
        assert_eq!(idx, vec![0, 1, 0, 1, 0, 1, 0, 1]);
    }
}
