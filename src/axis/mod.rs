//! Axis entities.
//!
//! An [`Axis`] is one sampling dimension of a field. It comes in three
//! kinds ([`AxisKind`]):
//! - `Linspace` - evenly spaced coordinates from `initial` to `final_value`
//! - `Values` - explicit, strictly monotonic coordinates
//! - `Pattern` - a unique set rebuilt into a whole support ([`Pattern`])
//!
//! Sampled axes (`Linspace`, `Values`) may carry a [`Periodicity`]. The axis
//! still describes its full declared range; the periodicity only changes how
//! many samples a field stores along it.
//!
//! Axes are immutable. Deriving a periodic view returns a new axis sharing
//! the base coordinates.

mod pattern;
mod periodicity;

pub use pattern::Pattern;
pub use periodicity::Periodicity;

use std::sync::Arc;

use crate::core::Reconstruction;
use crate::request::{Modifier, Selection};
use crate::util::{Error, Result};

/// Evenly spaced coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Linspace {
    pub initial: f64,
    pub final_value: f64,
    pub number: usize,
    pub include_endpoint: bool,
}

impl Linspace {
    /// Spacing between consecutive samples.
    pub fn step(&self) -> f64 {
        let intervals = if self.include_endpoint {
            self.number.saturating_sub(1)
        } else {
            self.number
        };
        if intervals == 0 {
            0.0
        } else {
            (self.final_value - self.initial) / intervals as f64
        }
    }

    /// Coordinate of sample `i`.
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        self.initial + i as f64 * self.step()
    }
}

/// Coordinate description of an axis.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisKind {
    Linspace(Linspace),
    Values(Arc<[f64]>),
    Pattern(Arc<Pattern>),
}

/// One sampling dimension of a field.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    name: String,
    unit: String,
    kind: AxisKind,
    periodicity: Option<Periodicity>,
}

impl Axis {
    /// Evenly spaced axis of `number` samples.
    pub fn linspace(
        name: impl Into<String>,
        unit: impl Into<String>,
        initial: f64,
        final_value: f64,
        number: usize,
        include_endpoint: bool,
    ) -> Result<Self> {
        let name = name.into();
        if number == 0 {
            return Err(Error::invalid_axis(name, "linspace needs at least one sample"));
        }
        if !initial.is_finite() || !final_value.is_finite() {
            return Err(Error::invalid_axis(name, "linspace bounds must be finite"));
        }
        let lin = Linspace { initial, final_value, number, include_endpoint };
        if number > 1 && lin.step() == 0.0 {
            return Err(Error::NonMonotonic { axis: name, index: 1 });
        }
        Ok(Self {
            name,
            unit: unit.into(),
            kind: AxisKind::Linspace(lin),
            periodicity: None,
        })
    }

    /// Axis over explicit, strictly monotonic coordinates.
    pub fn values(
        name: impl Into<String>,
        unit: impl Into<String>,
        values: impl Into<Vec<f64>>,
    ) -> Result<Self> {
        let name = name.into();
        let values = values.into();
        if values.is_empty() {
            return Err(Error::invalid_axis(name, "no coordinates"));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::invalid_axis(name, format!("non-finite coordinate at index {i}")));
        }
        if values.len() > 1 {
            let increasing = values[1] > values[0];
            let broken = values.windows(2).position(|p| {
                if increasing { p[1] <= p[0] } else { p[1] >= p[0] }
            });
            if let Some(i) = broken {
                return Err(Error::NonMonotonic { axis: name, index: i + 1 });
            }
        }
        Ok(Self {
            name,
            unit: unit.into(),
            kind: AxisKind::Values(values.into()),
            periodicity: None,
        })
    }

    /// Grouped-pattern axis.
    pub fn pattern(
        name: impl Into<String>,
        unit: impl Into<String>,
        pattern: Pattern,
    ) -> Result<Self> {
        let name = name.into();
        pattern.validate(&name)?;
        Ok(Self {
            name,
            unit: unit.into(),
            kind: AxisKind::Pattern(Arc::new(pattern)),
            periodicity: None,
        })
    }

    /// Derive a view of this axis repeating `period_count` times.
    ///
    /// The full declared length must be divisible by `period_count`; when
    /// anti-periodic the count is of anti-periods and must be even.
    /// `self` is left untouched.
    pub fn get_axis_periodic(&self, period_count: usize, is_antiperiod: bool) -> Result<Self> {
        if self.is_pattern() {
            return Err(Error::invalid_axis(&self.name, "pattern axes cannot carry a periodicity"));
        }
        let length = self.get_length(false);
        let periodicity = Periodicity::new(&self.name, length, period_count, is_antiperiod)?;
        tracing::debug!(
            axis = %self.name,
            period_count,
            is_antiperiod,
            stored = periodicity.smallest_length(),
            "derived periodic axis"
        );
        Ok(Self {
            periodicity: Some(periodicity),
            ..self.clone()
        })
    }

    /// Coordinates at the requested granularity.
    ///
    /// Without a periodicity all flags are ignored and the full sequence is
    /// returned. Pattern axes return their whole support.
    pub fn get_values(
        &self,
        is_smallestperiod: bool,
        is_oneperiod: bool,
        is_antiperiod: bool,
    ) -> Vec<f64> {
        let len = match (&self.kind, self.periodicity) {
            (AxisKind::Pattern(p), _) => return p.whole_values().to_vec(),
            (_, None) => self.get_length(false),
            (_, Some(p)) if is_smallestperiod || is_antiperiod => p.smallest_length(),
            (_, Some(p)) if is_oneperiod => p.one_period_length(),
            (_, Some(p)) => p.total_length(),
        };
        self.sampled_values(len)
    }

    /// Coordinates for a modifier, rejecting modifiers the kind cannot serve.
    pub fn get_values_for(&self, modifier: Modifier) -> Result<Vec<f64>> {
        Ok(self.reconstruct(&Selection::Modifier(modifier))?.coords)
    }

    /// Coordinates and field mapping for a selection on this axis.
    pub fn reconstruct(&self, selection: &Selection) -> Result<Reconstruction> {
        crate::core::reconstruct(self, selection)
    }

    /// Declared length: `N` for sampled axes, `W` (or `U` if `is_pattern`) for pattern axes.
    pub fn get_length(&self, is_pattern: bool) -> usize {
        match &self.kind {
            AxisKind::Linspace(lin) => lin.number,
            AxisKind::Values(v) => v.len(),
            AxisKind::Pattern(p) if is_pattern => p.unique_len(),
            AxisKind::Pattern(p) => p.whole_len(),
        }
    }

    /// Number of samples a field stores along this axis.
    pub fn stored_length(&self) -> usize {
        match (&self.kind, self.periodicity) {
            (AxisKind::Pattern(p), _) => p.unique_len(),
            (_, Some(p)) => p.smallest_length(),
            (_, None) => self.get_length(false),
        }
    }

    /// First `len` coordinates of a sampled axis.
    pub(crate) fn sampled_values(&self, len: usize) -> Vec<f64> {
        match &self.kind {
            AxisKind::Linspace(lin) => (0..len.min(lin.number)).map(|i| lin.value(i)).collect(),
            AxisKind::Values(v) => v[..len.min(v.len())].to_vec(),
            AxisKind::Pattern(p) => p.whole_values()[..len.min(p.whole_len())].to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn kind(&self) -> &AxisKind {
        &self.kind
    }

    pub fn periodicity(&self) -> Option<Periodicity> {
        self.periodicity
    }

    pub fn is_periodic(&self) -> bool {
        self.periodicity.is_some()
    }

    pub fn is_antiperiodic(&self) -> bool {
        self.periodicity.is_some_and(|p| p.is_antiperiod())
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self.kind, AxisKind::Pattern(_))
    }

    /// Pattern descriptor, if this is a pattern axis.
    pub fn as_pattern(&self) -> Option<&Pattern> {
        match &self.kind {
            AxisKind::Pattern(p) => Some(p),
            _ => None,
        }
    }
}
