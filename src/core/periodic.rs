//! Reconstruction along sampled (linspace / explicit) axes.

use super::{IndexMap, Reconstruction};
use crate::axis::Axis;
use crate::request::Modifier;
use crate::util::{Error, Result};

/// Coordinates and mapping of a sampled axis for `modifier`.
///
/// Coordinates always follow the axis's own progression: a full
/// reconstruction continues monotonically across periods instead of
/// repeating the stored block. The mapping tiles the stored block, negating
/// every other block when anti-periodic.
pub(crate) fn reconstruct(axis: &Axis, modifier: Modifier) -> Result<Reconstruction> {
    if modifier == Modifier::Pattern {
        return Err(Error::UnsupportedModifier {
            axis: axis.name().to_string(),
            modifier: modifier.to_string(),
        });
    }

    let Some(periodicity) = axis.periodicity() else {
        let n = axis.get_length(false);
        return Ok(Reconstruction::new(axis.sampled_values(n), IndexMap::identity(n)));
    };

    let len = match modifier {
        Modifier::SmallestPeriod | Modifier::AntiPeriod => periodicity.smallest_length(),
        Modifier::OnePeriod => periodicity.one_period_length(),
        _ => periodicity.total_length(),
    };
    tracing::trace!(axis = axis.name(), %modifier, len, "tiling periodic axis");

    let coords = axis.sampled_values(len);
    let map = IndexMap::from_fn(len, |i| periodicity.source(i));
    Ok(Reconstruction::new(coords, map))
}
