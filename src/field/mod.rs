//! Fields and multi-axis reconstruction.
//!
//! A [`Field`] holds values sampled over shared [`Axis`] references, stored
//! in reduced form: the smallest period along periodic axes and the unique
//! set along pattern axes. [`Field::get_along`] reconstructs every axis
//! independently and broadcasts the per-axis mappings over the stored array
//! in the field's declared axis order.

mod along;

pub use along::Along;

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use smallvec::SmallVec;

use crate::axis::Axis;
use crate::core::{IndexMap, Reconstruction};
use crate::request::{AxisRequest, Selection};
use crate::util::{Error, Result, Shape};

/// Out-of-band target coordinates for `axis=axis_data` requests.
pub type AxisData = HashMap<String, Vec<f64>>;

/// Numeric values sampled over a list of axes.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    symbol: String,
    unit: String,
    axes: Vec<Arc<Axis>>,
    values: Vec<f64>,
    shape: Shape,
}

impl Field {
    /// Create a field over `axes` with row-major `values`.
    ///
    /// `values` must hold exactly the product of each axis's stored length.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        axes: Vec<Arc<Axis>>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let shape: Shape = axes.iter().map(|a| a.stored_length()).collect();
        check_shape(&shape, &values)?;
        for (i, a) in axes.iter().enumerate() {
            if axes[..i].iter().any(|b| b.name() == a.name()) {
                return Err(Error::invalid_axis(a.name(), "axis attached twice to one field"));
            }
        }
        Ok(Self {
            name: name.into(),
            symbol: symbol.into(),
            unit: String::new(),
            axes,
            values,
            shape,
        })
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn axes(&self) -> &[Arc<Axis>] {
        &self.axes
    }

    /// Stored values, row-major over the axes.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Stored shape, one stored length per axis.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn get_axes_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.name()).collect()
    }

    /// Axis by name.
    pub fn axis(&self, name: &str) -> Option<&Arc<Axis>> {
        self.axes.iter().find(|a| a.name() == name)
    }

    /// Reconstruct along textual requests, e.g. `["time", "angle=[0,pi/4]"]`.
    ///
    /// Axes not named keep their full reconstruction.
    pub fn get_along<S: AsRef<str>>(&self, requests: &[S]) -> Result<Along> {
        self.get_along_with_data(requests, &AxisData::new())
    }

    /// Like [`get_along`](Self::get_along), with targets for `axis=axis_data` requests.
    pub fn get_along_with_data<S: AsRef<str>>(
        &self,
        requests: &[S],
        axis_data: &AxisData,
    ) -> Result<Along> {
        let parsed = requests
            .iter()
            .map(|r| AxisRequest::parse(r.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.get_along_requests(&parsed, axis_data)
    }

    /// Reconstruct along structured requests.
    #[tracing::instrument(skip_all, fields(field = %self.symbol, requests = requests.len()))]
    pub fn get_along_requests(
        &self,
        requests: &[AxisRequest],
        axis_data: &AxisData,
    ) -> Result<Along> {
        check_shape(&self.shape, &self.values)?;

        let mut selections: Vec<Option<Selection>> = vec![None; self.axes.len()];
        for req in requests {
            let pos = self
                .axes
                .iter()
                .position(|a| a.name() == req.axis_name)
                .ok_or_else(|| Error::AxisNotFound(req.axis_name.clone()))?;
            if selections[pos].is_some() {
                return Err(Error::parse(req.to_string(), "axis requested more than once"));
            }
            let selection = match &req.selection {
                Selection::AxisData => Selection::Targets(
                    axis_data
                        .get(&req.axis_name)
                        .cloned()
                        .ok_or_else(|| Error::MissingAxisData(req.axis_name.clone()))?,
                ),
                other => other.clone(),
            };
            selections[pos] = Some(selection);
        }

        let recs = self
            .axes
            .iter()
            .zip(selections)
            .map(|(axis, sel)| {
                let rec = axis.reconstruct(&sel.unwrap_or_default())?;
                if rec.map.max_source().is_some_and(|s| s >= axis.stored_length()) {
                    return Err(Error::LengthMismatch {
                        axis: axis.name().to_string(),
                        expected: axis.stored_length(),
                        actual: rec.map.max_source().map_or(0, |s| s + 1),
                    });
                }
                tracing::debug!(axis = axis.name(), len = rec.len(), "reconstructed axis");
                Ok(rec)
            })
            .collect::<Result<Vec<_>>>()?;

        let maps: Vec<&IndexMap> = recs.iter().map(|r| &r.map).collect();
        let (shape, values) = broadcast(&self.shape, &self.values, &maps);

        let axes = self
            .axes
            .iter()
            .zip(recs)
            .map(|(axis, Reconstruction { coords, .. })| (axis.name().to_string(), coords))
            .collect();
        Ok(Along::new(axes, self.symbol.clone(), values, shape))
    }
}

fn check_shape(shape: &Shape, values: &[f64]) -> Result<()> {
    if shape.num_points() != values.len() {
        return Err(Error::ShapeMismatch {
            expected: format!("{} ({} values)", shape, shape.num_points()),
            actual: format!("{} values", values.len()),
        });
    }
    Ok(())
}

/// Outer product of per-axis mappings over a row-major stored array.
///
/// Output element `(i_0, .., i_k)` is the sum over every combination of
/// terms `(s_d, w_d)` of `maps[d][i_d]` of `stored[s_0, .., s_k] * prod(w_d)`.
fn broadcast(stored_shape: &Shape, stored: &[f64], maps: &[&IndexMap]) -> (Shape, Vec<f64>) {
    let out_shape: Shape = maps.iter().map(|m| m.len()).collect();
    let strides = stored_shape.strides();
    let rank = maps.len();
    tracing::trace!(from = %stored_shape, to = %out_shape, "broadcasting");

    let mut out = vec![0.0; out_shape.num_points()];
    out.par_iter_mut().enumerate().for_each(|(flat, slot)| {
        let mut pos: SmallVec<[usize; 4]> = smallvec::smallvec![0; rank];
        out_shape.unravel(flat, &mut pos);
        *slot = gather(maps, &strides, &pos, stored, 0, 0, 1.0);
    });
    (out_shape, out)
}

fn gather(
    maps: &[&IndexMap],
    strides: &[usize],
    pos: &[usize],
    stored: &[f64],
    dim: usize,
    offset: usize,
    weight: f64,
) -> f64 {
    if dim == maps.len() {
        return weight * stored[offset];
    }
    maps[dim]
        .terms(pos[dim])
        .iter()
        .map(|&(s, w)| {
            let next = offset + s * strides[dim];
            gather(maps, strides, pos, stored, dim + 1, next, weight * w)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Pattern;

    fn time_periodic() -> Arc<Axis> {
        Arc::new(
            Axis::linspace("time", "s", 0.0, 10.0, 10, false)
                .unwrap()
                .get_axis_periodic(5, false)
                .unwrap(),
        )
    }

    #[test]
    fn test_shape_checked_at_construction() {
        let err = Field::new("field", "X", vec![time_periodic()], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_duplicate_axis_rejected() {
        let t = time_periodic();
        assert!(Field::new("field", "X", vec![t.clone(), t], vec![0.0; 4]).is_err());
    }

    #[test]
    fn test_full_reconstruction() {
        let f = Field::new("field", "X", vec![time_periodic()], vec![50.0, 55.0]).unwrap();
        let r = f.get_along(&["time"]).unwrap();
        assert_eq!(r["X"], [50., 55., 50., 55., 50., 55., 50., 55., 50., 55.]);
        assert_eq!(r["time"].len(), 10);
    }

    #[test]
    fn test_default_is_full() {
        let f = Field::new("field", "X", vec![time_periodic()], vec![50.0, 55.0]).unwrap();
        let none: [&str; 0] = [];
        assert_eq!(f.get_along(&none).unwrap(), f.get_along(&["time"]).unwrap());
    }

    #[test]
    fn test_unknown_axis() {
        let f = Field::new("field", "X", vec![time_periodic()], vec![50.0, 55.0]).unwrap();
        assert!(matches!(
            f.get_along(&["angle"]),
            Err(Error::AxisNotFound(name)) if name == "angle"
        ));
        assert!(matches!(f.get_along(&["time", "time[oneperiod]"]), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_axis_data_required() {
        let p = Pattern::new(vec![0.0, 1.0], vec![0, 1], vec![0, 1]);
        let slices = Arc::new(Axis::pattern("slice", "m", p).unwrap());
        let f = Field::new("field", "X", vec![slices], vec![1.0, 2.0]).unwrap();
        assert!(matches!(f.get_along(&["slice=axis_data"]), Err(Error::MissingAxisData(_))));

        let mut data = AxisData::new();
        data.insert("slice".to_string(), vec![0.5]);
        let r = f.get_along_with_data(&["slice=axis_data"], &data).unwrap();
        assert_eq!(r["slice"], [0.5]);
        // step patterns hold the sample at or before the target
        assert_eq!(r["X"], [1.0]);
    }

    #[test]
    fn test_axis_data_on_periodic_axis() {
        let f = Field::new("field", "X", vec![time_periodic()], vec![50.0, 55.0]).unwrap();
        let mut data = AxisData::new();
        data.insert("time".to_string(), vec![0.5]);
        assert!(matches!(
            f.get_along_with_data(&["time=axis_data"], &data),
            Err(Error::UnsupportedResampling(_))
        ));
    }

    #[test]
    fn test_broadcast_two_axes() {
        // stored [2 x 3], first axis tiled with signs, second picked
        let stored_shape = Shape::from_slice(&[2, 3]);
        let stored = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let a = IndexMap::from_fn(4, |i| (i % 2, if i >= 2 { -1.0 } else { 1.0 }));
        let b: IndexMap = [(2, 1.0), (0, 1.0)].into_iter().collect();
        let (shape, out) = broadcast(&stored_shape, &stored, &[&a, &b]);
        assert_eq!(shape.sizes(), &[4, 2]);
        assert_eq!(out, vec![3.0, 1.0, 6.0, 4.0, -3.0, -1.0, -6.0, -4.0]);
    }

    #[test]
    fn test_scalar_field() {
        let f = Field::new("field", "X", vec![], vec![7.0]).unwrap();
        let none: [&str; 0] = [];
        let r = f.get_along(&none).unwrap();
        assert_eq!(r["X"], [7.0]);
        assert_eq!(r.shape().rank(), 0);
    }
}
