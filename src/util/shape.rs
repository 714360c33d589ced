//! Multi-dimensional array shapes.
//!
//! A field stores its values flat, in row-major order over its axes.
//! [`Shape`] carries the per-axis extents and the index arithmetic.

use smallvec::SmallVec;

/// Extents of a row-major array, one per axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Size of each dimension. Empty means scalar (rank 0).
    dims: SmallVec<[usize; 4]>,
}

impl Shape {
    /// Create from a slice of extents.
    pub fn from_slice(sizes: &[usize]) -> Self {
        Self { dims: SmallVec::from_slice(sizes) }
    }

    /// Number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Extent of one dimension, `None` if out of range.
    pub fn size(&self, dim: usize) -> Option<usize> {
        self.dims.get(dim).copied()
    }

    /// All extents.
    pub fn sizes(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of elements (product of extents).
    pub fn num_points(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major strides in elements: the last axis varies fastest.
    pub fn strides(&self) -> SmallVec<[usize; 4]> {
        let mut strides: SmallVec<[usize; 4]> = smallvec::smallvec![1; self.dims.len()];
        for d in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * self.dims[d + 1];
        }
        strides
    }

    /// Split a flat row-major offset into per-axis positions.
    pub fn unravel(&self, mut flat: usize, out: &mut [usize]) {
        for d in (0..self.dims.len()).rev() {
            let n = self.dims[d].max(1);
            out[d] = flat % n;
            flat /= n;
        }
    }
}

impl From<usize> for Shape {
    fn from(size: usize) -> Self {
        Self { dims: smallvec::smallvec![size] }
    }
}

impl From<Vec<usize>> for Shape {
    fn from(v: Vec<usize>) -> Self {
        Self { dims: SmallVec::from_vec(v) }
    }
}

impl FromIterator<usize> for Shape {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self { dims: iter.into_iter().collect() }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let s = Shape::default();
        assert_eq!(s.rank(), 0);
        assert_eq!(s.num_points(), 1);
        assert_eq!(format!("{}", s), "[]");
    }

    #[test]
    fn test_2d() {
        let s = Shape::from_slice(&[2, 10]);
        assert_eq!(s.rank(), 2);
        assert_eq!(s.size(1), Some(10));
        assert_eq!(s.size(2), None);
        assert_eq!(s.num_points(), 20);
        assert_eq!(format!("{}", s), "[2 x 10]");
    }

    #[test]
    fn test_strides_and_unravel() {
        let s: Shape = vec![3, 4, 5].into();
        assert_eq!(s.strides().as_slice(), &[20, 5, 1]);

        let mut pos = [0usize; 3];
        s.unravel(2 * 20 + 3 * 5 + 4, &mut pos);
        assert_eq!(pos, [2, 3, 4]);
    }

    #[test]
    fn test_collect() {
        let s: Shape = [2usize, 2].into_iter().collect();
        assert_eq!(s.sizes(), &[2, 2]);
        assert_eq!(s.num_points(), 4);
    }
}
