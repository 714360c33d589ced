//! Reconstruction along grouped-pattern axes.

use super::mapping::{hold, interpolate, IndexMap, Terms};
use super::{tolerance, Reconstruction};
use crate::axis::{Axis, Pattern};
use crate::request::Modifier;
use crate::util::{Error, Result};

/// Whole support (`None`) or unique set (`Pattern`).
pub(crate) fn reconstruct(
    axis: &Axis,
    pattern: &Pattern,
    modifier: Modifier,
) -> Result<Reconstruction> {
    match modifier {
        Modifier::None => {
            let map = pattern.rebuild_indices().iter().map(|&r| (r, 1.0)).collect();
            Ok(Reconstruction::new(pattern.whole_values().to_vec(), map))
        }
        Modifier::Pattern => Ok(Reconstruction::new(
            pattern.unique_values().to_vec(),
            IndexMap::identity(pattern.unique_len()),
        )),
        other => Err(Error::UnsupportedModifier {
            axis: axis.name().to_string(),
            modifier: other.to_string(),
        }),
    }
}

/// Resample onto arbitrary `targets` over the whole support.
///
/// Step patterns hold the value of the support point at or before each
/// target and average the groups meeting at a shared boundary. Linear
/// patterns interpolate between neighbouring support points. Both clamp to
/// the edge value outside the support.
pub(crate) fn resample(pattern: &Pattern, targets: &[f64]) -> Reconstruction {
    let xs = pattern.whole_values();
    let sources = pattern.rebuild_indices();
    let sample: fn(&[f64], &[usize], f64, f64) -> Terms = if pattern.is_step() {
        hold
    } else {
        interpolate
    };
    tracing::trace!(
        support = xs.len(),
        targets = targets.len(),
        step = pattern.is_step(),
        "resampling pattern"
    );

    let map = IndexMap::from_terms(
        targets
            .iter()
            .map(|&t| sample(xs, sources, t, tolerance(t)))
            .collect(),
    );
    Reconstruction::new(targets.to_vec(), map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices() -> Axis {
        let p = Pattern::new(
            vec![-5.0, -3.0, -1.0, 1.0, 3.0],
            vec![0, 2, 4, 6, 8],
            vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4],
        )
        .with_whole(vec![-5.0, -3.0, -3.0, -1.0, -1.0, 1.0, 1.0, 3.0, 3.0, 5.0]);
        Axis::pattern("slice", "m", p).unwrap()
    }

    fn targets() -> Vec<f64> {
        (-5..=5).map(|t| t as f64).collect()
    }

    #[test]
    fn test_whole_and_pattern() {
        let axis = slices();
        let p = axis.as_pattern().unwrap();
        let stored = [10.0, 20.0, 30.0, 40.0, 50.0];

        let r = reconstruct(&axis, p, Modifier::None).unwrap();
        assert_eq!(r.coords, p.whole_values());
        assert_eq!(r.map.apply(&stored), vec![10., 10., 20., 20., 30., 30., 40., 40., 50., 50.]);

        let r = reconstruct(&axis, p, Modifier::Pattern).unwrap();
        assert_eq!(r.coords, p.unique_values());
        assert_eq!(r.map.apply(&stored), stored.to_vec());
    }

    #[test]
    fn test_period_modifier_rejected() {
        let axis = slices();
        let p = axis.as_pattern().unwrap();
        assert!(matches!(
            reconstruct(&axis, p, Modifier::OnePeriod),
            Err(Error::UnsupportedModifier { .. })
        ));
    }

    #[test]
    fn test_step_resample() {
        let axis = slices();
        let r = resample(axis.as_pattern().unwrap(), &targets());
        assert_eq!(
            r.map.apply(&[10.0, 20.0, 30.0, 40.0, 50.0]),
            vec![10., 10., 15., 20., 25., 30., 35., 40., 45., 50., 50.]
        );
        assert_eq!(
            r.map.apply(&[10.0, 20.0, 30.0, 20.0, 10.0]),
            vec![10., 10., 15., 20., 25., 30., 25., 20., 15., 10., 10.]
        );
    }

    #[test]
    fn test_single_value_resample() {
        let axis = Axis::pattern("slice", "m", Pattern::new(vec![0.0], vec![0], vec![0])).unwrap();
        let r = resample(axis.as_pattern().unwrap(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(r.map.apply(&[10.0]), vec![10.0; 5]);
    }

    #[test]
    fn test_linear_resample() {
        let p = Pattern::new(
            vec![-5.0, -3.0, -1.0, 0.0],
            vec![0, 1, 3, 5],
            vec![0, 1, 1, 2, 2, 3, 2, 2, 1, 1, 0],
        )
        .with_whole(vec![-5.0, -3.0, -3.0, -1.0, -1.0, 0.0, 1.0, 1.0, 3.0, 3.0, 5.0])
        .with_step(false);
        let axis = Axis::pattern("slice", "m", p).unwrap();
        let r = resample(axis.as_pattern().unwrap(), &targets());
        assert_eq!(
            r.map.apply(&[10.0, 20.0, 30.0, 35.0]),
            vec![10., 15., 20., 25., 30., 35., 30., 25., 20., 15., 10.]
        );
    }

    #[test]
    fn test_step_holds_inside_groups() {
        let axis = slices();
        let r = resample(axis.as_pattern().unwrap(), &[-4.5, -3.5, -2.5, 0.25, 4.9]);
        assert_eq!(r.map.apply(&[10.0, 20.0, 30.0, 40.0, 50.0]), vec![10., 10., 20., 30., 50.]);
    }

    #[test]
    fn test_step_and_linear_differ() {
        let targets = [0.5, 1.5];
        let stored = [10.0, 20.0, 30.0];

        let step = Pattern::new(vec![0.0, 1.0, 2.0], vec![0, 1, 2], vec![0, 1, 2]);
        let step = Axis::pattern("slice", "m", step).unwrap();
        let r = resample(step.as_pattern().unwrap(), &targets);
        assert_eq!(r.map.apply(&stored), vec![10.0, 20.0]);

        let linear = Pattern::new(vec![0.0, 1.0, 2.0], vec![0, 1, 2], vec![0, 1, 2])
            .with_step(false);
        let linear = Axis::pattern("slice", "m", linear).unwrap();
        let r = resample(linear.as_pattern().unwrap(), &targets);
        assert_eq!(r.map.apply(&stored), vec![15.0, 25.0]);
    }
}
