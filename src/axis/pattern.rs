//! Grouped-pattern descriptor.
//!
//! A pattern axis stores `U` unique coordinates and rebuilds a "whole"
//! support of `W >= U` coordinates from them. Group boundaries shared by two
//! neighbouring groups appear twice in the whole support, e.g. slices
//! `[-5,-3], [-3,-1], ...` give `whole = [-5,-3,-3,-1,...]`.
//!
//! Like indexed geometry parameters, the reduced set is expanded through an
//! index array: `whole[i]` carries the value stored at `rebuild_indices[i]`.

use crate::util::{Error, Result};

/// Mapping between a unique value set and its expanded whole support.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    unique_values: Vec<f64>,
    whole_values: Vec<f64>,
    unique_indices: Vec<usize>,
    rebuild_indices: Vec<usize>,
    is_step: bool,
}

impl Pattern {
    /// Describe a pattern whose whole support is `unique_values[rebuild_indices[i]]`.
    ///
    /// The description is checked when attached to an axis with
    /// [`Axis::pattern`](crate::axis::Axis::pattern).
    pub fn new(
        unique_values: Vec<f64>,
        unique_indices: Vec<usize>,
        rebuild_indices: Vec<usize>,
    ) -> Self {
        let whole_values = rebuild_indices
            .iter()
            .map(|&r| unique_values.get(r).copied().unwrap_or(f64::NAN))
            .collect();
        Self {
            unique_values,
            whole_values,
            unique_indices,
            rebuild_indices,
            is_step: true,
        }
    }

    /// Use an explicit whole support instead of the rebuilt one.
    pub fn with_whole(mut self, whole_values: Vec<f64>) -> Self {
        self.whole_values = whole_values;
        self
    }

    /// Choose step (`true`, default) or linear resampling.
    pub fn with_step(mut self, is_step: bool) -> Self {
        self.is_step = is_step;
        self
    }

    /// Check every index invariant. `axis` names the owner in errors.
    pub(crate) fn validate(&self, axis: &str) -> Result<()> {
        let u = self.unique_values.len();
        let w = self.whole_values.len();
        if u == 0 {
            return Err(Error::pattern(axis, "no unique values"));
        }
        if self.rebuild_indices.len() != w {
            return Err(Error::pattern(
                axis,
                format!("{} rebuild indices for {} whole values", self.rebuild_indices.len(), w),
            ));
        }
        if w < u {
            return Err(Error::pattern(
                axis,
                format!("whole support ({w}) shorter than unique set ({u})"),
            ));
        }
        if let Some(pos) = self.rebuild_indices.iter().position(|&r| r >= u) {
            return Err(Error::pattern(
                axis,
                format!(
                    "rebuild index {} at position {pos} exceeds {u} unique values",
                    self.rebuild_indices[pos]
                ),
            ));
        }
        if self.unique_indices.len() != u {
            return Err(Error::pattern(
                axis,
                format!("{} unique indices for {u} unique values", self.unique_indices.len()),
            ));
        }
        for (k, &idx) in self.unique_indices.iter().enumerate() {
            if idx >= w {
                let msg = format!("unique index {idx} outside whole support");
                return Err(Error::pattern(axis, msg));
            }
            if k > 0 && idx <= self.unique_indices[k - 1] {
                return Err(Error::pattern(axis, "unique indices must be strictly increasing"));
            }
            if self.rebuild_indices[idx] != k {
                return Err(Error::pattern(
                    axis,
                    format!("whole position {idx} does not rebuild unique value {k}"),
                ));
            }
            if self.rebuild_indices[..idx].contains(&k) {
                return Err(Error::pattern(
                    axis,
                    format!("unique index {idx} is not the first occurrence of value {k}"),
                ));
            }
        }
        if self.whole_values.iter().any(|v| !v.is_finite()) {
            return Err(Error::pattern(axis, "whole support holds non-finite coordinates"));
        }
        for (k, &idx) in self.unique_indices.iter().enumerate() {
            let (u, w) = (self.unique_values[k], self.whole_values[idx]);
            if (u - w).abs() > crate::core::tolerance(u) {
                return Err(Error::pattern(
                    axis,
                    format!("unique value {u} differs from whole value {w} at position {idx}"),
                ));
            }
        }
        if let Some(i) = self.whole_values.windows(2).position(|p| p[1] < p[0]) {
            let msg = format!("whole support decreases at position {}", i + 1);
            return Err(Error::pattern(axis, msg));
        }
        Ok(())
    }

    /// Unique coordinates (`U` values, the stored representation).
    pub fn unique_values(&self) -> &[f64] {
        &self.unique_values
    }

    /// Whole coordinates (`W` values, with duplicates).
    pub fn whole_values(&self) -> &[f64] {
        &self.whole_values
    }

    /// First whole position of each unique value.
    pub fn unique_indices(&self) -> &[usize] {
        &self.unique_indices
    }

    /// Unique slot of each whole position.
    pub fn rebuild_indices(&self) -> &[usize] {
        &self.rebuild_indices
    }

    /// Step (hold) or linear resampling.
    pub fn is_step(&self) -> bool {
        self.is_step
    }

    /// `U`.
    pub fn unique_len(&self) -> usize {
        self.unique_values.len()
    }

    /// `W`.
    pub fn whole_len(&self) -> usize {
        self.whole_values.len()
    }
}
