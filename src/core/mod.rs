//! Reconstruction engine.
//!
//! A pure function of (axis, selection) to (coordinates, mapping):
//! - [`Reconstruction`] - requested coordinates plus an [`IndexMap`]
//! - [`reconstruct`] - dispatch on the axis kind, then range selection
//!
//! Sampled axes tile their stored block (negating alternate blocks when
//! anti-periodic); pattern axes expand through their rebuild indices or
//! resample onto arbitrary targets.

mod mapping;
mod pattern;
mod periodic;

pub use mapping::{hold, interpolate, IndexMap, Term, Terms};

use crate::axis::{Axis, AxisKind};
use crate::request::{Modifier, Selection};
use crate::util::{Error, Result};

/// Relative tolerance for coordinate comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Absolute tolerance around a coordinate of magnitude `|x|`.
#[inline]
pub fn tolerance(x: f64) -> f64 {
    TOLERANCE * x.abs().max(1.0)
}

/// Requested coordinates of one axis and how field values follow them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconstruction {
    pub coords: Vec<f64>,
    pub map: IndexMap,
}

impl Reconstruction {
    pub fn new(coords: Vec<f64>, map: IndexMap) -> Self {
        debug_assert_eq!(coords.len(), map.len());
        Self { coords, map }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Field values along this axis for a one-dimensional stored array.
    pub fn apply(&self, stored: &[f64]) -> Vec<f64> {
        self.map.apply(stored)
    }
}

/// Reconstruct `axis` for `selection`.
///
/// Full reconstructions are checked against the axis's declared length.
/// `Selection::AxisData` must be resolved to targets by the caller.
pub fn reconstruct(axis: &Axis, selection: &Selection) -> Result<Reconstruction> {
    let rec = match selection {
        Selection::Modifier(modifier) => reconstruct_kind(axis, *modifier)?,
        Selection::Range { lower, upper } => {
            let full = reconstruct_kind(axis, Modifier::None)?;
            select_range(axis, full, *lower, *upper)?
        }
        Selection::Targets(targets) => match axis.kind() {
            AxisKind::Pattern(p) => pattern::resample(p, targets),
            _ => return Err(Error::UnsupportedResampling(axis.name().to_string())),
        },
        Selection::AxisData => return Err(Error::MissingAxisData(axis.name().to_string())),
    };

    if rec.coords.len() != rec.map.len() {
        return Err(Error::LengthMismatch {
            axis: axis.name().to_string(),
            expected: rec.coords.len(),
            actual: rec.map.len(),
        });
    }
    Ok(rec)
}

fn reconstruct_kind(axis: &Axis, modifier: Modifier) -> Result<Reconstruction> {
    let rec = match axis.kind() {
        AxisKind::Pattern(p) => pattern::reconstruct(axis, p, modifier)?,
        AxisKind::Linspace(_) | AxisKind::Values(_) => periodic::reconstruct(axis, modifier)?,
    };
    if modifier == Modifier::None {
        let declared = axis.get_length(false);
        if rec.len() != declared {
            return Err(Error::LengthMismatch {
                axis: axis.name().to_string(),
                expected: declared,
                actual: rec.len(),
            });
        }
    }
    Ok(rec)
}

/// Keep coordinates `v` with `lower <= v < upper`.
fn select_range(
    axis: &Axis,
    full: Reconstruction,
    lower: f64,
    upper: f64,
) -> Result<Reconstruction> {
    let positions: Vec<usize> = full
        .coords
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v >= lower - tolerance(lower) && v < upper - tolerance(upper))
        .map(|(i, _)| i)
        .collect();
    if positions.is_empty() {
        return Err(Error::EmptySelection {
            axis: axis.name().to_string(),
            lower,
            upper,
        });
    }
    tracing::debug!(
        axis = axis.name(),
        lower,
        upper,
        selected = positions.len(),
        "range selection"
    );
    let coords = positions.iter().map(|&p| full.coords[p]).collect();
    Ok(Reconstruction::new(coords, full.map.select(&positions)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Pattern;
    use std::f64::consts::PI;

    fn angle() -> Axis {
        Axis::linspace("angle", "rad", 0.0, 2.0 * PI, 16, false)
            .unwrap()
            .get_axis_periodic(4, true)
            .unwrap()
    }

    #[test]
    fn test_range_half_open() {
        let r = reconstruct(&angle(), &Selection::Range { lower: 0.0, upper: PI / 4.0 }).unwrap();
        assert_eq!(r.len(), 2);
        assert!((r.coords[1] - PI / 8.0).abs() < 1e-12);

        let r = reconstruct(&angle(), &Selection::Range { lower: PI / 4.0, upper: PI }).unwrap();
        assert_eq!(r.len(), 6);
        assert!((r.coords[0] - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_range_keeps_signs() {
        // positions 4..8 of the full axis are the negated block
        let r = reconstruct(&angle(), &Selection::Range { lower: PI / 2.0, upper: PI }).unwrap();
        assert_eq!(r.apply(&[1.0, 2.0, 3.0, 4.0]), vec![-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    fn test_range_empty() {
        assert!(matches!(
            reconstruct(&angle(), &Selection::Range { lower: 10.0, upper: 11.0 }),
            Err(Error::EmptySelection { .. })
        ));
    }

    #[test]
    fn test_targets_need_pattern_axis() {
        assert!(matches!(
            reconstruct(&angle(), &Selection::Targets(vec![0.0])),
            Err(Error::UnsupportedResampling(_))
        ));
        assert!(matches!(
            reconstruct(&angle(), &Selection::AxisData),
            Err(Error::MissingAxisData(_))
        ));
    }

    #[test]
    fn test_range_on_pattern() {
        let p = Pattern::new(
            vec![-5.0, -3.0, -1.0, 1.0, 3.0],
            vec![0, 2, 4, 6, 8],
            vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4],
        )
        .with_whole(vec![-5.0, -3.0, -3.0, -1.0, -1.0, 1.0, 1.0, 3.0, 3.0, 5.0]);
        let axis = Axis::pattern("slice", "m", p).unwrap();
        let r = reconstruct(&axis, &Selection::Range { lower: -3.0, upper: 1.0 }).unwrap();
        assert_eq!(r.coords, vec![-3.0, -3.0, -1.0, -1.0]);
        assert_eq!(r.apply(&[10.0, 20.0, 30.0, 40.0, 50.0]), vec![10.0, 20.0, 20.0, 30.0]);
    }

    #[test]
    fn test_round_trip_smallest_period() {
        let axis = Axis::values("x", "m", vec![0.0, 0.5, 1.5, 2.0, 3.0, 3.5])
            .unwrap()
            .get_axis_periodic(3, false)
            .unwrap();
        let full = reconstruct(&axis, &Selection::default()).unwrap();
        let smallest = reconstruct(&axis, &Selection::Modifier(Modifier::SmallestPeriod)).unwrap();
        assert_eq!(&full.coords[..smallest.len()], smallest.coords.as_slice());
        let one = reconstruct(&axis, &Selection::Modifier(Modifier::OnePeriod)).unwrap();
        assert_eq!(full.len(), 3 * one.len());
        assert_eq!(smallest.apply(&[1.0, 2.0]), vec![1.0, 2.0]);
    }
}
