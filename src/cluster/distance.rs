//! Distance metrics and the dense pairwise distance matrix.

use crate::error::{Error, Result};

/// Distance function between two equal-length vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
}

impl Metric {
    /// Distance between `a` and `b`.
    #[inline]
    pub fn between(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Metric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| {
                    let d = x - y;
                    d * d
                })
                .sum::<f32>()
                .sqrt(),
            Metric::Manhattan => a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum(),
        }
    }
}

/// Dense symmetric matrix of pairwise distances.
///
/// Stored row-major as a flat `n * n` buffer. Only off-diagonal entries are
/// meaningful; the diagonal is written as zero but a self-distance is never
/// a sensible query, and [`get`](DistanceMatrix::get) rejects it in debug
/// builds.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    dists: Vec<f32>,
    n: usize,
}

impl DistanceMatrix {
    /// Compute all pairwise distances for `data` under `metric`.
    pub fn compute(data: &[Vec<f32>], metric: Metric) -> Result<Self> {
        let n = data.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let d = data[0].len();
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for point in data.iter().skip(1) {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
        }

        let mut dists = vec![0.0f32; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dist = metric.between(&data[i], &data[j]);
                dists[i * n + j] = dist;
                dists[j * n + i] = dist;
            }
        }
        Ok(Self { dists, n })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix covers no points.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`, which must differ.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        debug_assert_ne!(i, j, "self-distance is not meaningful");
        self.dists[i * self.n + j]
    }
}

/// A pair of points and the distance between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pair {
    /// Lower point index.
    pub i: usize,
    /// Higher point index.
    pub j: usize,
    /// Distance between the two points.
    pub distance: f32,
}

/// All unordered point pairs ranked by ascending distance.
///
/// Equal distances keep the lower `(i, j)` pair first. `limit` caps how
/// many pairs come back; pass `usize::MAX` for all of them.
pub fn closest_pairs(data: &[Vec<f32>], metric: Metric, limit: usize) -> Result<Vec<Pair>> {
    let matrix = DistanceMatrix::compute(data, metric)?;
    let n = matrix.len();

    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(Pair {
                i,
                j,
                distance: matrix.get(i, j),
            });
        }
    }
    pairs.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| (a.i, a.j).cmp(&(b.i, b.j)))
    });
    pairs.truncate(limit);
    Ok(pairs)
}
