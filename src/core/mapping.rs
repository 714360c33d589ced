//! Per-element source mappings.
//!
//! Every reconstructed element along an axis is a weighted sum of stored
//! samples. Tiling contributes a single term with weight `±1`, resampling
//! at most two interpolation terms.

use smallvec::SmallVec;

/// `(stored_index, weight)`.
pub type Term = (usize, f64);

/// Terms of one output element. Two inline slots cover every mapping kind.
pub type Terms = SmallVec<[Term; 2]>;

/// Mapping from reconstructed positions to stored samples along one axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexMap {
    entries: Vec<Terms>,
}

impl IndexMap {
    /// Output position `i` reads stored sample `i`.
    pub fn identity(len: usize) -> Self {
        (0..len).map(|i| (i, 1.0)).collect()
    }

    /// Build from one term per output position.
    pub fn from_fn(len: usize, f: impl Fn(usize) -> Term) -> Self {
        (0..len).map(f).collect()
    }

    /// Build from arbitrary term lists.
    pub fn from_terms(entries: Vec<Terms>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms feeding output position `i`.
    #[inline]
    pub fn terms(&self, i: usize) -> &[Term] {
        &self.entries[i]
    }

    /// Keep only the given output positions, in order.
    pub fn select(&self, positions: &[usize]) -> Self {
        Self {
            entries: positions.iter().map(|&p| self.entries[p].clone()).collect(),
        }
    }

    /// Largest stored index referenced, `None` for an empty map.
    pub fn max_source(&self) -> Option<usize> {
        self.entries.iter().flat_map(|t| t.iter().map(|&(s, _)| s)).max()
    }

    /// Apply to a one-dimensional stored array.
    pub fn apply(&self, stored: &[f64]) -> Vec<f64> {
        self.entries
            .iter()
            .map(|terms| terms.iter().map(|&(s, w)| w * stored[s]).sum())
            .collect()
    }
}

impl FromIterator<Term> for IndexMap {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|t| smallvec::smallvec![t]).collect(),
        }
    }
}

/// Interpolate at `t` over non-decreasing `xs`, each point reading `sources[k]`.
///
/// Outside `[xs[0], xs[last]]` the edge value is held. A target on a
/// repeated coordinate resolves to the lowest-index repeat.
pub fn interpolate(xs: &[f64], sources: &[usize], t: f64, tol: f64) -> Terms {
    debug_assert_eq!(xs.len(), sources.len());
    let n = xs.len();
    let j = xs.partition_point(|&x| x < t - tol);
    if j == n {
        return smallvec::smallvec![(sources[n - 1], 1.0)];
    }
    if (xs[j] - t).abs() <= tol || j == 0 {
        return smallvec::smallvec![(sources[j], 1.0)];
    }
    let i = j - 1;
    let w = (t - xs[i]) / (xs[j] - xs[i]);
    if sources[i] == sources[j] {
        smallvec::smallvec![(sources[i], 1.0)]
    } else {
        smallvec::smallvec![(sources[i], 1.0 - w), (sources[j], w)]
    }
}

/// Hold at `t` over non-decreasing `xs`, each point reading `sources[k]`.
///
/// Between two points the value of the one at or before `t` is held, and
/// outside `[xs[0], xs[last]]` the edge value. A target on a coordinate
/// repeated across different sources averages them.
pub fn hold(xs: &[f64], sources: &[usize], t: f64, tol: f64) -> Terms {
    debug_assert_eq!(xs.len(), sources.len());
    let lo = xs.partition_point(|&x| x < t - tol);
    let hi = xs.partition_point(|&x| x <= t + tol);
    if lo == hi {
        let k = lo.saturating_sub(1).min(xs.len() - 1);
        return smallvec::smallvec![(sources[k], 1.0)];
    }

    let mut terms = Terms::new();
    for &s in &sources[lo..hi] {
        if !terms.iter().any(|&(k, _)| k == s) {
            terms.push((s, 0.0));
        }
    }
    let w = 1.0 / terms.len() as f64;
    for term in terms.iter_mut() {
        term.1 = w;
    }
    terms
}
