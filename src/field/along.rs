//! Result of a multi-axis reconstruction.

use std::ops::Index;

use crate::util::Shape;

/// Reconstructed coordinates per axis plus the reconstructed field values.
///
/// Indexing by name returns either an axis's coordinates or, for the
/// field's symbol, its values (row-major over [`shape`](Self::shape)).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Along {
    axes: Vec<(String, Vec<f64>)>,
    symbol: String,
    values: Vec<f64>,
    shape: Shape,
}

impl Along {
    pub(crate) fn new(
        axes: Vec<(String, Vec<f64>)>,
        symbol: String,
        values: Vec<f64>,
        shape: Shape,
    ) -> Self {
        Self { axes, symbol, values, shape }
    }

    /// Coordinates of an axis, or the values if `key` is the field symbol.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        if key == self.symbol {
            return Some(&self.values);
        }
        self.axes.iter().find(|(name, _)| name == key).map(|(_, c)| c.as_slice())
    }

    /// Axis names in the field's axis order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|(name, _)| name.as_str())
    }

    /// `(axis_name, coordinates)` pairs in the field's axis order.
    pub fn axes(&self) -> &[(String, Vec<f64>)] {
        &self.axes
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Reconstructed shape, one extent per axis.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Value at per-axis positions.
    pub fn value_at(&self, pos: &[usize]) -> Option<f64> {
        if pos.len() != self.shape.rank() {
            return None;
        }
        let mut flat = 0;
        for ((&p, &n), s) in pos.iter().zip(self.shape.sizes()).zip(self.shape.strides()) {
            if p >= n {
                return None;
            }
            flat += p * s;
        }
        self.values.get(flat).copied()
    }
}

impl Index<&str> for Along {
    type Output = [f64];

    fn index(&self, key: &str) -> &[f64] {
        match self.get(key) {
            Some(v) => v,
            None => panic!("no axis or symbol named '{key}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Along {
        Along::new(
            vec![("angle".into(), vec![0.0, 1.0]), ("time".into(), vec![0.0, 1.0, 2.0])],
            "X".into(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            Shape::from_slice(&[2, 3]),
        )
    }

    #[test]
    fn test_lookup() {
        let a = sample();
        assert_eq!(a["time"], [0.0, 1.0, 2.0]);
        assert_eq!(a.get("X").map(|v| v.len()), Some(6));
        assert!(a.get("slice").is_none());
        assert_eq!(a.axis_names().collect::<Vec<_>>(), vec!["angle", "time"]);
    }

    #[test]
    fn test_value_at() {
        let a = sample();
        assert_eq!(a.value_at(&[1, 2]), Some(6.0));
        assert_eq!(a.value_at(&[0, 1]), Some(2.0));
        assert_eq!(a.value_at(&[2, 0]), None);
        assert_eq!(a.value_at(&[0]), None);
    }

    #[test]
    #[should_panic(expected = "no axis or symbol")]
    fn test_index_missing() {
        let _ = &sample()["phase"];
    }
}
